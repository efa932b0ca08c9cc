use rotahours::auth::AuthService;
use rotahours::config::Config;
use rotahours::processor::{process_records, ShiftRecord};

fn test_config() -> Config {
    Config {
        port: 3000,
        admin_username: "admin".to_string(),
        admin_password: "hunter2".to_string(),
        jwt_secret: "smoke_test_secret".to_string(),
        token_expiry_minutes: 60,
        max_upload_bytes: 10 * 1024 * 1024,
    }
}

/// Smoke test to verify that a config can be constructed and read
#[test]
fn test_config_fields() {
    let config = test_config();

    assert_eq!(config.port, 3000);
    assert_eq!(config.admin_username, "admin");
    assert_eq!(config.max_upload_bytes, 10 * 1024 * 1024);
}

/// Smoke test for the auth service: issue a token and validate it back
#[test]
fn test_auth_service_round_trip() {
    let service = AuthService::new(&test_config());

    let token = service.authenticate("admin", "hunter2").unwrap();
    let claims = service.validate_token(&token).unwrap();

    assert_eq!(claims.sub, "admin");
    assert!(service.authenticate("admin", "nope").is_err());
}

/// Smoke test for the engine: one record in, one table out
#[test]
fn test_engine_minimal_run() {
    let records = vec![ShiftRecord {
        employee: "A. Smith".to_string(),
        rota: "Days".to_string(),
        date: "03/06/2024".to_string(),
        recorded: Some("08:00 - 16:30".to_string()),
    }];

    let result = process_records(records).unwrap();

    assert_eq!(result.outputs.len(), 1);
    let output = result.get("Days").unwrap();
    assert_eq!(output.filename, "Days_03_06_2024.csv");
    assert_eq!(
        output.table.headers,
        vec!["Employee Name", "03/06/2024", "Monday Hours"]
    );
    assert_eq!(output.table.rows[0], vec!["A. Smith", "08:00 - 16:30", "8.50"]);
}
