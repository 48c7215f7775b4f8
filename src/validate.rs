//! Advisory client-side validation, mirroring the backend's bean constraints.
//!
//! The backend is authoritative; these checks exist so callers can reject
//! obviously bad input before a round-trip. Resource functions never invoke
//! them implicitly; only the blank-key pre-flight check is automatic.

use lazy_static::lazy_static;
use regex::Regex;

use crate::errors::ApiClientError;
use crate::models::{CarroData, MantenimientoData};

lazy_static! {
    static ref PLACA_RE: Regex = Regex::new(r"^[A-Z]{3}-[0-9]{3}$").expect("placa regex");
}

pub const ANIO_MIN: i32 = 1950;
pub const ANIO_MAX: i32 = 2025;
pub const PUERTAS_MIN: u8 = 2;
pub const PUERTAS_MAX: u8 = 5;
pub const KILOMETRAJE_MAX: u32 = 1_000_000;
pub const DESCRIPCION_MIN: usize = 10;
pub const DESCRIPCION_MAX: usize = 500;

pub fn placa_valida(placa: &str) -> bool {
    PLACA_RE.is_match(placa)
}

fn check_placa(placa: &str) -> Result<(), ApiClientError> {
    if !placa_valida(placa) {
        return Err(ApiClientError::Validation(format!(
            "placa '{placa}' does not match the ABC-123 pattern"
        )));
    }
    Ok(())
}

impl CarroData {
    /// Check the vehicle payload against the backend's constraints.
    pub fn validate(&self) -> Result<(), ApiClientError> {
        check_placa(&self.placa)?;
        if !(ANIO_MIN..=ANIO_MAX).contains(&self.anio) {
            return Err(ApiClientError::Validation(format!(
                "anio must be between {ANIO_MIN} and {ANIO_MAX}"
            )));
        }
        if !(PUERTAS_MIN..=PUERTAS_MAX).contains(&self.numero_puertas) {
            return Err(ApiClientError::Validation(format!(
                "numeroPuertas must be between {PUERTAS_MIN} and {PUERTAS_MAX}"
            )));
        }
        if self.precio <= 0.0 {
            return Err(ApiClientError::Validation(
                "precio must be greater than 0".to_string(),
            ));
        }
        Ok(())
    }
}

impl MantenimientoData {
    /// Check the maintenance payload against the backend's constraints.
    pub fn validate(&self) -> Result<(), ApiClientError> {
        check_placa(&self.placa_carro)?;
        if self.kilometraje > KILOMETRAJE_MAX {
            return Err(ApiClientError::Validation(format!(
                "kilometraje cannot exceed {KILOMETRAJE_MAX}"
            )));
        }
        if self.costo <= 0.0 {
            return Err(ApiClientError::Validation(
                "costo must be greater than 0".to_string(),
            ));
        }
        let len = self.descripcion.chars().count();
        if !(DESCRIPCION_MIN..=DESCRIPCION_MAX).contains(&len) {
            return Err(ApiClientError::Validation(format!(
                "descripcion must be between {DESCRIPCION_MIN} and {DESCRIPCION_MAX} characters"
            )));
        }
        Ok(())
    }
}
