//! Explicit connectivity check, meant to be driven by a test harness or a
//! small CLI rather than hanging off global mutable state.

use tracing::info;

use crate::client::ApiClient;

/// Outcome of one probe step. The error string is the normalized client
/// error's message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepResult {
    Ok(String),
    Failed(String),
}

impl StepResult {
    pub fn is_ok(&self) -> bool {
        matches!(self, StepResult::Ok(_))
    }
}

#[derive(Debug, Clone)]
pub struct DiagnosticsReport {
    pub carro_health: StepResult,
    pub carro_list: StepResult,
    pub carro_lookup: StepResult,
    pub mantenimiento_health: StepResult,
    pub mantenimiento_list: StepResult,
    pub mantenimiento_estadisticas: StepResult,
}

impl DiagnosticsReport {
    pub fn all_ok(&self) -> bool {
        self.carro_health.is_ok()
            && self.carro_list.is_ok()
            && self.carro_lookup.is_ok()
            && self.mantenimiento_health.is_ok()
            && self.mantenimiento_list.is_ok()
            && self.mantenimiento_estadisticas.is_ok()
    }
}

/// Probe the backend: health checks for both collections, vehicle listing, a
/// by-plate lookup of the first listed vehicle, maintenance listing and the
/// statistics endpoint. Individual failures are captured per step; the probe
/// itself always completes.
pub async fn run_diagnostics(client: &ApiClient) -> DiagnosticsReport {
    let carros = client.carros();
    let mantenimientos = client.mantenimientos();

    let carro_health = match carros.health_check().await {
        Ok(body) => StepResult::Ok(body),
        Err(e) => StepResult::Failed(e.to_string()),
    };

    let mut first_placa = None;
    let carro_list = match carros.list(None).await {
        Ok(list) => {
            first_placa = list.first().map(|c| c.placa.clone());
            StepResult::Ok(format!("{} carros", list.len()))
        }
        Err(e) => StepResult::Failed(e.to_string()),
    };

    let carro_lookup = match &first_placa {
        Some(placa) => match carros.get_by_placa(placa).await {
            Ok(Some(carro)) => StepResult::Ok(carro.placa),
            Ok(None) => StepResult::Failed(format!("carro {placa} vanished between calls")),
            Err(e) => StepResult::Failed(e.to_string()),
        },
        None => StepResult::Ok("no carros to look up".to_string()),
    };

    let mantenimiento_health = match mantenimientos.health_check().await {
        Ok(body) => StepResult::Ok(body),
        Err(e) => StepResult::Failed(e.to_string()),
    };

    let mantenimiento_list = match mantenimientos.list(None).await {
        Ok(list) => StepResult::Ok(format!("{} mantenimientos", list.len())),
        Err(e) => StepResult::Failed(e.to_string()),
    };

    let mantenimiento_estadisticas = match mantenimientos.estadisticas().await {
        Ok(stats) => StepResult::Ok(format!("{} registros en total", stats.total_mantenimientos)),
        Err(e) => StepResult::Failed(e.to_string()),
    };

    let report = DiagnosticsReport {
        carro_health,
        carro_list,
        carro_lookup,
        mantenimiento_health,
        mantenimiento_list,
        mantenimiento_estadisticas,
    };
    info!(all_ok = report.all_ok(), "diagnostics finished");
    report
}
