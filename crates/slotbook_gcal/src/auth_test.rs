#[cfg(test)]
mod tests {
    use crate::auth::{create_authenticator, GcalSession};
    use crate::client::GcalClient;
    use crate::logic::{AvailabilityError, GcalError, WorkingWindow};
    use slotbook_config::{AppConfig, AvailabilityConfig, GcalConfig};

    fn gcal_config(key_path: Option<&str>) -> GcalConfig {
        GcalConfig {
            key_path: key_path.map(str::to_string),
            calendar_id: "primary".to_string(),
        }
    }

    #[tokio::test]
    async fn test_create_authenticator_missing_key_path() {
        let result = create_authenticator(&gcal_config(None)).await;
        match result {
            Err(GcalError::Config(msg)) => assert!(msg.contains("key_path"), "got: {}", msg),
            Err(other) => panic!("unexpected error: {}", other),
            Ok(_) => panic!("Expected an error but got Ok"),
        }
    }

    #[tokio::test]
    async fn test_create_authenticator_invalid_key_path() {
        let result = create_authenticator(&gcal_config(Some("/nonexistent/sa.json"))).await;
        match result {
            Err(GcalError::Config(msg)) => {
                assert!(msg.contains("/nonexistent/sa.json"), "got: {}", msg)
            }
            Err(other) => panic!("unexpected error: {}", other),
            Ok(_) => panic!("Expected an error but got Ok"),
        }
    }

    #[tokio::test]
    async fn test_session_initialize_fails_without_credentials() {
        let result = GcalSession::initialize(&gcal_config(None)).await;
        assert!(matches!(result, Err(GcalError::Config(_))));
    }

    #[tokio::test]
    async fn test_client_stays_uninitialized_after_failed_init() {
        let client = GcalClient::new(gcal_config(None), WorkingWindow::default());
        assert!(!client.is_initialized());

        assert!(client.session().await.is_err());
        assert!(!client.is_initialized());

        // Not cached: the next call tries again and fails the same way
        assert!(matches!(client.session().await, Err(GcalError::Config(_))));
    }

    #[test]
    fn test_client_from_app_config() {
        let disabled = AppConfig::default();
        assert!(matches!(
            GcalClient::from_app_config(&disabled),
            Err(GcalError::Config(_))
        ));

        let missing_section = AppConfig {
            use_gcal: true,
            ..AppConfig::default()
        };
        assert!(matches!(
            GcalClient::from_app_config(&missing_section),
            Err(GcalError::Config(_))
        ));

        let bad_window = AppConfig {
            use_gcal: true,
            gcal: Some(gcal_config(Some("sa.json"))),
            availability: AvailabilityConfig {
                day_start_hour: 18,
                ..AvailabilityConfig::default()
            },
            ..AppConfig::default()
        };
        assert!(matches!(
            GcalClient::from_app_config(&bad_window),
            Err(GcalError::Availability(AvailabilityError::InvalidConfiguration(_)))
        ));

        let ok = AppConfig {
            use_gcal: true,
            gcal: Some(gcal_config(Some("sa.json"))),
            ..AppConfig::default()
        };
        let client = GcalClient::from_app_config(&ok).expect("client");
        assert_eq!(client.calendar_id(), "primary");
        assert_eq!(client.window(), &WorkingWindow::default());
        assert!(!client.is_initialized());
    }
}
