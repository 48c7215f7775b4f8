//! End-to-end tests against a simulated backend.
//!
//! Every test stands up its own `MockServer`, so nothing is shared between
//! tests and expectations are verified when the server drops.

use chrono::NaiveDate;
use serde_json::json;
use wiremock::matchers::{
    any, body_json, header, method, path, query_param, query_param_is_missing,
};
use wiremock::{Match, Mock, MockServer, Request, ResponseTemplate};

use flota_api_client::{
    diagnostics, ApiClient, ApiClientError, ApiConfig, CarroData, CarroFilter, Combustible, Estado,
    MantenimientoData, TipoMantenimiento, Transmision,
};

const BASIC_ADMIN: &str = "Basic YWRtaW46YWRtaW4=";

fn test_client(uri: &str) -> ApiClient {
    ApiClient::new(&ApiConfig::new(
        uri,
        Some(flota_api_client::Credentials {
            username: "admin".to_string(),
            password: "admin".to_string(),
        }),
    ))
    .unwrap()
}

fn carro_json() -> serde_json::Value {
    json!({
        "placa": "ABC-123",
        "marca": "Toyota",
        "color": "Blanco",
        "modelo": "Corolla",
        "anio": 2023,
        "estado": "NUEVO",
        "combustible": "GASOLINA",
        "numeroPuertas": 4,
        "tieneAireAcondicionado": true,
        "precio": 50000000.0,
        "fechaRegistro": "2023-10-01 12:00:00",
        "tipoTransmision": "MANUAL",
        "tipoVehiculo": "AUTOMÓVIL"
    })
}

fn carro_data() -> CarroData {
    CarroData {
        placa: "ABC-123".to_string(),
        marca: "Toyota".to_string(),
        color: "Blanco".to_string(),
        modelo: "Corolla".to_string(),
        anio: 2023,
        estado: Estado::Nuevo,
        combustible: Combustible::Gasolina,
        numero_puertas: 4,
        tiene_aire_acondicionado: true,
        precio: 50_000_000.0,
        fecha_registro: NaiveDate::from_ymd_opt(2023, 10, 1)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap(),
        tipo_transmision: Transmision::Manual,
    }
}

fn mantenimiento_json() -> serde_json::Value {
    json!({
        "id": "m-1",
        "placaCarro": "ABC-123",
        "fechaMantenimiento": "2024-01-15 09:30:00",
        "kilometraje": 45000,
        "tipoMantenimiento": "CAMBIO_ACEITE",
        "costo": 180000.0,
        "descripcion": "Cambio de aceite y filtro",
        "proximoMantenimiento": null,
        "completado": true
    })
}

/// Matches only requests that carry no Authorization header.
struct NoAuthHeader;

impl Match for NoAuthHeader {
    fn matches(&self, request: &Request) -> bool {
        !request.headers.contains_key("authorization")
    }
}

#[tokio::test]
async fn list_carros_hits_collection_with_basic_auth() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/carro"))
        .and(header("Authorization", BASIC_ADMIN))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([carro_json()])))
        .expect(1)
        .mount(&server)
        .await;

    let carros = test_client(&server.uri()).carros().list(None).await.unwrap();
    assert_eq!(carros.len(), 1);
    assert_eq!(carros[0].placa, "ABC-123");
    assert_eq!(carros[0].tipo_vehiculo.as_deref(), Some("AUTOMÓVIL"));
}

#[tokio::test]
async fn list_carros_serializes_filters_with_wire_names() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/carro"))
        .and(query_param("placa", "ABC-123"))
        .and(query_param("anio", "2023"))
        .and(query_param("aire_acondicionado", "true"))
        .and(query_param_is_missing("marca"))
        .and(query_param_is_missing("color"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&server)
        .await;

    let filter = CarroFilter {
        placa: Some("ABC-123".to_string()),
        marca: Some("".to_string()),
        color: None,
        anio: Some(2023),
        tiene_aire_acondicionado: Some(true),
        ..CarroFilter::default()
    };
    let carros = test_client(&server.uri())
        .carros()
        .list(Some(&filter))
        .await
        .unwrap();
    assert!(carros.is_empty());
}

#[tokio::test]
async fn get_by_placa_returns_first_match() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/carro"))
        .and(query_param("placa", "ABC-123"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([carro_json()])))
        .mount(&server)
        .await;

    let carro = test_client(&server.uri())
        .carros()
        .get_by_placa("ABC-123")
        .await
        .unwrap();
    assert_eq!(carro.unwrap().marca, "Toyota");
}

#[tokio::test]
async fn get_by_placa_zero_matches_is_none() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/carro"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;

    let carro = test_client(&server.uri())
        .carros()
        .get_by_placa("XYZ-999")
        .await
        .unwrap();
    assert!(carro.is_none());
}

#[tokio::test]
async fn blank_keys_fail_before_any_network_call() {
    let server = MockServer::start().await;
    Mock::given(any())
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let carros = client.carros();

    for placa in ["", "   "] {
        let err = carros.get_by_placa(placa).await.unwrap_err();
        assert!(matches!(err, ApiClientError::Validation(_)));
        let err = carros.update(placa, &carro_data()).await.unwrap_err();
        assert!(matches!(err, ApiClientError::Validation(_)));
        let err = carros.delete(placa).await.unwrap_err();
        assert!(matches!(err, ApiClientError::Validation(_)));
    }
    let err = client.mantenimientos().get_by_id("  ").await.unwrap_err();
    assert!(matches!(err, ApiClientError::Validation(_)));
}

#[tokio::test]
async fn create_posts_payload_and_returns_canonical_record() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/carro"))
        .and(header("Content-Type", "application/json"))
        .and(body_json(serde_json::to_value(carro_data()).unwrap()))
        .respond_with(ResponseTemplate::new(201).set_body_json(carro_json()))
        .expect(1)
        .mount(&server)
        .await;

    let created = test_client(&server.uri())
        .carros()
        .create(&carro_data())
        .await
        .unwrap();
    // Server-computed field comes back even though it was never sent.
    assert_eq!(created.tipo_vehiculo.as_deref(), Some("AUTOMÓVIL"));
}

#[tokio::test]
async fn update_percent_encodes_key_as_path_segment() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/api/carro/ABC-123%2FTEST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(carro_json()))
        .expect(1)
        .mount(&server)
        .await;

    test_client(&server.uri())
        .carros()
        .update("ABC-123/TEST", &carro_data())
        .await
        .unwrap();
}

#[tokio::test]
async fn delete_accepts_plain_text_success_body() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/api/carro/ABC-123"))
        .respond_with(ResponseTemplate::new(200).set_body_raw("Carro eliminado", "text/plain"))
        .expect(1)
        .mount(&server)
        .await;

    test_client(&server.uri())
        .carros()
        .delete("ABC-123")
        .await
        .unwrap();
}

#[tokio::test]
async fn non_json_success_body_yields_empty_list() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/carro"))
        .respond_with(ResponseTemplate::new(200).set_body_raw("plain", "text/plain"))
        .mount(&server)
        .await;

    let carros = test_client(&server.uri()).carros().list(None).await.unwrap();
    assert!(carros.is_empty());
}

#[tokio::test]
async fn server_error_message_surfaces_verbatim() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/carro"))
        .respond_with(
            ResponseTemplate::new(404).set_body_json(json!({"message": "Carro no encontrado"})),
        )
        .mount(&server)
        .await;

    let err = test_client(&server.uri())
        .carros()
        .list(None)
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "Carro no encontrado");
    assert_eq!(err.status().map(|s| s.as_u16()), Some(404));
}

#[tokio::test]
async fn unparsable_error_body_falls_back_to_status_line() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/carro"))
        .respond_with(ResponseTemplate::new(500).set_body_raw("<html>boom</html>", "text/html"))
        .mount(&server)
        .await;

    let err = test_client(&server.uri())
        .carros()
        .list(None)
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "HTTP 500: Internal Server Error");
    assert_eq!(err.status().map(|s| s.as_u16()), Some(500));
}

#[tokio::test]
async fn unauthorized_maps_to_credentials_message() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/carro"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let err = test_client(&server.uri())
        .carros()
        .list(None)
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "Authentication failed: invalid credentials");
    assert_eq!(err.status().map(|s| s.as_u16()), Some(401));
}

#[tokio::test]
async fn transport_failure_is_a_network_error() {
    // Discard port: nothing listens there, the connection is refused.
    let client = test_client("http://127.0.0.1:9");
    let err = client.carros().list(None).await.unwrap_err();
    assert!(matches!(err, ApiClientError::NetworkError(_)));
    assert!(err.to_string().starts_with("Network error: "));
    assert_eq!(err.status(), None);
}

#[tokio::test]
async fn mantenimientos_do_not_send_credentials() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/mantenimiento"))
        .and(NoAuthHeader)
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([mantenimiento_json()])))
        .expect(1)
        .mount(&server)
        .await;

    let registros = test_client(&server.uri())
        .mantenimientos()
        .list(None)
        .await
        .unwrap();
    assert_eq!(registros[0].id, "m-1");
    assert_eq!(
        registros[0].tipo_mantenimiento,
        TipoMantenimiento::CambioAceite
    );
}

#[tokio::test]
async fn mantenimiento_crud_round_trip() {
    let server = MockServer::start().await;
    let data = MantenimientoData {
        placa_carro: "ABC-123".to_string(),
        fecha_mantenimiento: NaiveDate::from_ymd_opt(2024, 1, 15)
            .unwrap()
            .and_hms_opt(9, 30, 0)
            .unwrap(),
        kilometraje: 45_000,
        tipo_mantenimiento: TipoMantenimiento::CambioAceite,
        costo: 180_000.0,
        descripcion: "Cambio de aceite y filtro".to_string(),
        proximo_mantenimiento: None,
        completado: true,
    };

    Mock::given(method("POST"))
        .and(path("/api/mantenimiento"))
        .and(body_json(serde_json::to_value(&data).unwrap()))
        .respond_with(ResponseTemplate::new(201).set_body_json(mantenimiento_json()))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .and(path("/api/mantenimiento/m-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(mantenimiento_json()))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/api/mantenimiento/m-1"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let api = client.mantenimientos();
    let created = api.create(&data).await.unwrap();
    assert_eq!(created.id, "m-1");
    api.update("m-1", &data).await.unwrap();
    api.delete("m-1").await.unwrap();
}

#[tokio::test]
async fn mantenimiento_action_queries() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/mantenimiento"))
        .and(query_param("action", "urgentes"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([mantenimiento_json()])))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/mantenimiento"))
        .and(query_param("action", "estadisticas"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "total_mantenimientos": 12,
            "costo_promedio": 150000.0,
            "costo_total": 1800000.0
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/mantenimiento/carro/ABC-123"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([mantenimiento_json()])))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let api = client.mantenimientos();

    let urgentes = api.urgentes().await.unwrap();
    assert_eq!(urgentes.len(), 1);

    let stats = api.estadisticas().await.unwrap();
    assert_eq!(stats.total_mantenimientos, 12);
    assert_eq!(stats.costo_total, 1_800_000.0);

    let por_carro = api.por_carro("ABC-123").await.unwrap();
    assert_eq!(por_carro[0].placa_carro, "ABC-123");
}

#[tokio::test]
async fn diagnostics_reports_every_step() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/carro/healthCheck"))
        .respond_with(ResponseTemplate::new(200).set_body_raw("Servicio activo", "text/plain"))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/mantenimiento/healthCheck"))
        .respond_with(ResponseTemplate::new(200).set_body_raw("Servicio activo", "text/plain"))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/carro"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([carro_json()])))
        .mount(&server)
        .await;
    // Mounted before the bare list mock: first matching mock wins, and the
    // bare path matcher would also match the action query.
    Mock::given(method("GET"))
        .and(path("/api/mantenimiento"))
        .and(query_param("action", "estadisticas"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "total_mantenimientos": 0,
            "costo_promedio": 0.0,
            "costo_total": 0.0
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/mantenimiento"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let report = diagnostics::run_diagnostics(&client).await;
    assert!(report.all_ok(), "report: {report:?}");
    assert!(report.mantenimiento_health.is_ok());
}

#[tokio::test]
async fn diagnostics_captures_failures_without_aborting() {
    let server = MockServer::start().await;
    Mock::given(any())
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let report = diagnostics::run_diagnostics(&client).await;
    assert!(!report.all_ok());
    assert!(!report.carro_list.is_ok());
}
