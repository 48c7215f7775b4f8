//! Wire types for the vehicle and maintenance inventory API.
//!
//! Field names follow the backend's JSON (camelCase); timestamps use the
//! `yyyy-MM-dd HH:mm:ss` layout from [`crate::datetime`]. Read-only fields
//! the server computes live only on the full records, never on the write
//! payloads, so they are never sent back on create/update.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::datetime;
use crate::query::QueryString;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Estado {
    Nuevo,
    Usado,
    Excelente,
    Bueno,
    Regular,
}

impl Estado {
    pub fn as_str(&self) -> &'static str {
        match self {
            Estado::Nuevo => "NUEVO",
            Estado::Usado => "USADO",
            Estado::Excelente => "EXCELENTE",
            Estado::Bueno => "BUENO",
            Estado::Regular => "REGULAR",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Combustible {
    Gasolina,
    Diesel,
    Hibrido,
    Electrico,
}

impl Combustible {
    pub fn as_str(&self) -> &'static str {
        match self {
            Combustible::Gasolina => "GASOLINA",
            Combustible::Diesel => "DIESEL",
            Combustible::Hibrido => "HIBRIDO",
            Combustible::Electrico => "ELECTRICO",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Transmision {
    Manual,
    Automatica,
}

impl Transmision {
    pub fn as_str(&self) -> &'static str {
        match self {
            Transmision::Manual => "MANUAL",
            Transmision::Automatica => "AUTOMATICA",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TipoMantenimiento {
    Preventivo,
    Correctivo,
    CambioAceite,
    CambioFrenos,
    CambioLlantas,
    AlineacionBalanceo,
    RevisionGeneral,
    CambioFiltros,
    SistemaElectrico,
    Transmision,
    Suspension,
    Otro,
}

impl TipoMantenimiento {
    pub fn as_str(&self) -> &'static str {
        match self {
            TipoMantenimiento::Preventivo => "PREVENTIVO",
            TipoMantenimiento::Correctivo => "CORRECTIVO",
            TipoMantenimiento::CambioAceite => "CAMBIO_ACEITE",
            TipoMantenimiento::CambioFrenos => "CAMBIO_FRENOS",
            TipoMantenimiento::CambioLlantas => "CAMBIO_LLANTAS",
            TipoMantenimiento::AlineacionBalanceo => "ALINEACION_BALANCEO",
            TipoMantenimiento::RevisionGeneral => "REVISION_GENERAL",
            TipoMantenimiento::CambioFiltros => "CAMBIO_FILTROS",
            TipoMantenimiento::SistemaElectrico => "SISTEMA_ELECTRICO",
            TipoMantenimiento::Transmision => "TRANSMISION",
            TipoMantenimiento::Suspension => "SUSPENSION",
            TipoMantenimiento::Otro => "OTRO",
        }
    }
}

/// Server-derived maintenance status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EstadoMantenimiento {
    Completado,
    Urgente,
    Vencido,
    Pendiente,
}

/// A vehicle record as returned by the backend. The `placa` (license plate)
/// is the natural key and is immutable after creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Carro {
    pub placa: String,
    pub marca: String,
    pub color: String,
    pub modelo: String,
    pub anio: i32,
    pub estado: Estado,
    pub combustible: Combustible,
    pub numero_puertas: u8,
    pub tiene_aire_acondicionado: bool,
    pub precio: f64,
    #[serde(with = "datetime")]
    pub fecha_registro: NaiveDateTime,
    pub tipo_transmision: Transmision,

    // Computed server-side, read-only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tipo_vehiculo: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detalles_especificos: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub informacion_completa: Option<String>,
}

/// Write payload for creating or updating a vehicle. Same shape as `Carro`
/// minus the server-computed fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CarroData {
    pub placa: String,
    pub marca: String,
    pub color: String,
    pub modelo: String,
    pub anio: i32,
    pub estado: Estado,
    pub combustible: Combustible,
    pub numero_puertas: u8,
    pub tiene_aire_acondicionado: bool,
    pub precio: f64,
    #[serde(with = "datetime")]
    pub fecha_registro: NaiveDateTime,
    pub tipo_transmision: Transmision,
}

/// A maintenance record. Identified by a server-generated opaque id and
/// referencing a vehicle by plate; the reference is not enforced client-side.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Mantenimiento {
    pub id: String,
    pub placa_carro: String,
    #[serde(with = "datetime")]
    pub fecha_mantenimiento: NaiveDateTime,
    pub kilometraje: u32,
    pub tipo_mantenimiento: TipoMantenimiento,
    pub costo: f64,
    pub descripcion: String,
    #[serde(default, with = "datetime::option")]
    pub proximo_mantenimiento: Option<NaiveDateTime>,
    pub completado: bool,

    // Computed server-side, read-only.
    #[serde(
        default,
        with = "datetime::option",
        skip_serializing_if = "Option::is_none"
    )]
    pub fecha_registro: Option<NaiveDateTime>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub estado_mantenimiento: Option<EstadoMantenimiento>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub es_urgente: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub costo_con_impuesto: Option<f64>,
}

/// Write payload for creating or updating a maintenance record. The id is
/// carried in the URL path on update, never in the body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MantenimientoData {
    pub placa_carro: String,
    #[serde(with = "datetime")]
    pub fecha_mantenimiento: NaiveDateTime,
    pub kilometraje: u32,
    pub tipo_mantenimiento: TipoMantenimiento,
    pub costo: f64,
    pub descripcion: String,
    #[serde(default, with = "datetime::option")]
    pub proximo_mantenimiento: Option<NaiveDateTime>,
    pub completado: bool,
}

/// Aggregate figures from `GET api/mantenimiento?action=estadisticas`.
/// This endpoint reports in snake_case, unlike the records.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Estadisticas {
    pub total_mantenimientos: u64,
    pub costo_promedio: f64,
    pub costo_total: f64,
}

/// Search filters for the vehicle collection. Every field is optional; unset
/// fields are omitted from the query string entirely.
#[derive(Debug, Clone, Default)]
pub struct CarroFilter {
    pub placa: Option<String>,
    pub marca: Option<String>,
    pub color: Option<String>,
    pub modelo: Option<String>,
    pub anio: Option<i32>,
    pub estado: Option<Estado>,
    pub combustible: Option<Combustible>,
    pub tipo_transmision: Option<Transmision>,
    pub numero_puertas: Option<u8>,
    pub tiene_aire_acondicionado: Option<bool>,
    pub precio_min: Option<f64>,
    pub precio_max: Option<f64>,
    pub fecha_desde: Option<NaiveDateTime>,
    pub fecha_hasta: Option<NaiveDateTime>,
}

impl CarroFilter {
    pub fn by_placa(placa: &str) -> Self {
        Self {
            placa: Some(placa.to_string()),
            ..Self::default()
        }
    }

    /// Serialize with the controller's expected parameter names, which differ
    /// from the record's field names for a handful of filters.
    pub(crate) fn to_query(&self) -> QueryString {
        let mut q = QueryString::new();
        q.push_str("placa", self.placa.as_deref());
        q.push_str("marca", self.marca.as_deref());
        q.push_str("color", self.color.as_deref());
        q.push_str("modelo", self.modelo.as_deref());
        q.push("anio", self.anio);
        q.push_str("estado", self.estado.map(|e| e.as_str()));
        q.push_str("combustible", self.combustible.map(|c| c.as_str()));
        q.push_str("transmision", self.tipo_transmision.map(|t| t.as_str()));
        q.push("numero_puertas", self.numero_puertas);
        q.push("aire_acondicionado", self.tiene_aire_acondicionado);
        q.push("precioMin", self.precio_min);
        q.push("precioMax", self.precio_max);
        q.push_str(
            "fechadesde",
            self.fecha_desde.map(|d| datetime::format(&d)).as_deref(),
        );
        q.push_str(
            "fechahasta",
            self.fecha_hasta.map(|d| datetime::format(&d)).as_deref(),
        );
        q
    }
}

/// Search filters for the maintenance collection. Parameter names here match
/// the backend verbatim.
#[derive(Debug, Clone, Default)]
pub struct MantenimientoFilter {
    pub id: Option<String>,
    pub placa_carro: Option<String>,
    pub tipo_mantenimiento: Option<TipoMantenimiento>,
    pub kilometraje_min: Option<u32>,
    pub kilometraje_max: Option<u32>,
    pub costo_min: Option<f64>,
    pub costo_max: Option<f64>,
    pub completado: Option<bool>,
    pub urgente: Option<bool>,
}

impl MantenimientoFilter {
    pub fn by_id(id: &str) -> Self {
        Self {
            id: Some(id.to_string()),
            ..Self::default()
        }
    }

    pub(crate) fn to_query(&self) -> QueryString {
        let mut q = QueryString::new();
        q.push_str("id", self.id.as_deref());
        q.push_str("placaCarro", self.placa_carro.as_deref());
        q.push_str(
            "tipoMantenimiento",
            self.tipo_mantenimiento.map(|t| t.as_str()),
        );
        q.push("kilometraje_min", self.kilometraje_min);
        q.push("kilometraje_max", self.kilometraje_max);
        q.push("costo_min", self.costo_min);
        q.push("costo_max", self.costo_max);
        q.push("completado", self.completado);
        q.push("urgente", self.urgente);
        q
    }
}
