//! User-facing messages (Spanish, es-AR).

pub const FIRST_NAME_EMPTY: &str = "El nombre no puede estar vacío.";
pub const LAST_NAME_EMPTY: &str = "El apellido no puede estar vacío.";
pub const NATIONAL_ID_INVALID: &str = "DNI inválido: usar 7 u 8 dígitos.";
pub const PHONE_INVALID: &str = "Teléfono inválido: solo números, +, (), - y espacios.";
pub const BIRTH_DATE_NOT_PAST: &str = "La fecha de nacimiento debe ser pasada.";
pub const GRADE_INVALID: &str = "Grado/Curso debe ser un número válido.";
pub const EDUCATION_LEVEL_INVALID: &str = "Seleccioná un nivel educativo válido.";
pub const GENDER_INVALID: &str = "Seleccioná un género válido.";

pub const DUPLICATE_NATIONAL_ID: &str = "Ya existe un paciente con ese DNI.";
pub const PATIENT_SAVED: &str = "Paciente cargado correctamente.";

pub const CLEAR_ALL_PROMPT: &str = "¿Eliminar todos los pacientes?";

/// Confirmation asked before deleting one row.
pub fn delete_prompt(national_id: &str) -> String {
    format!("¿Eliminar al paciente con DNI {}?", national_id)
}

/// Accessible label of a row's delete action.
pub fn delete_label(display_name: &str) -> String {
    format!("Eliminar a {}", display_name)
}
