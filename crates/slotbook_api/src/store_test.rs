#[cfg(test)]
mod tests {
    use crate::calendar::{
        ApiSlot, BookEventRequest, BookingResponse, CalendarStatus, MockCalendarApi,
    };
    use crate::client::ApiError;
    use crate::store::*;
    use chrono::NaiveDate;
    use mockall::predicate::eq;

    fn slot(start: &str, end: &str) -> ApiSlot {
        ApiSlot {
            start: start.to_string(),
            end: end.to_string(),
            formatted_time: None,
        }
    }

    fn booking() -> BookEventRequest {
        BookEventRequest {
            summary: "Intro call".to_string(),
            description: None,
            start: "2025-05-05T09:00:00Z".to_string(),
            end: "2025-05-05T10:00:00Z".to_string(),
            attendees: vec!["guest@example.com".to_string()],
        }
    }

    #[test]
    fn test_default_state() {
        let store = CalendarStore::new(MockCalendarApi::new());
        let state = store.state();
        assert!(!state.is_connected);
        assert!(!state.is_loading);
        assert!(state.error.is_none());
        assert!(state.available_slots.is_empty());
        assert_eq!(state.selected_date.len(), 10);
        assert!(NaiveDate::parse_from_str(&state.selected_date, "%Y-%m-%d").is_ok());
    }

    #[test]
    fn test_normalize_date() {
        let expected = NaiveDate::from_ymd_opt(2025, 5, 5).unwrap();
        assert_eq!(normalize_date("2025-05-05").unwrap(), expected);
        assert_eq!(normalize_date(" 2025-05-05 ").unwrap(), expected);
        assert_eq!(normalize_date("2025-05-05T13:00:00+02:00").unwrap(), expected);
        assert!(matches!(
            normalize_date("05/05/2025"),
            Err(ApiError::InvalidInput(_))
        ));
    }

    #[tokio::test]
    async fn test_check_connection_sets_status() {
        let mut api = MockCalendarApi::new();
        api.expect_calendar_status().times(1).returning(|| {
            Ok(CalendarStatus {
                connected: true,
                expires_at: Some("2025-06-01T00:00:00Z".to_string()),
            })
        });

        let mut store = CalendarStore::new(api);
        store.check_connection().await;

        assert!(store.state().is_connected);
        assert_eq!(
            store.state().expires_at.as_deref(),
            Some("2025-06-01T00:00:00Z")
        );
        assert!(!store.state().is_loading);
        assert!(store.state().error.is_none());
    }

    #[tokio::test]
    async fn test_check_connection_failure_sets_error() {
        let mut api = MockCalendarApi::new();
        api.expect_calendar_status()
            .returning(|| Err(ApiError::Unauthorized));

        let mut store = CalendarStore::new(api);
        store.check_connection().await;

        assert!(!store.state().is_connected);
        assert_eq!(store.state().error.as_deref(), Some(CHECK_CONNECTION_FAILED));
        assert!(!store.state().is_loading);
    }

    #[tokio::test]
    async fn test_get_connect_url() {
        let mut api = MockCalendarApi::new();
        api.expect_get_auth_url()
            .times(1)
            .returning(|| Ok("https://accounts.google.com/o/oauth2/auth?x=1".to_string()));

        let mut store = CalendarStore::new(api);
        let url = store.get_connect_url().await;
        assert_eq!(url.as_deref(), Some("https://accounts.google.com/o/oauth2/auth?x=1"));
    }

    #[tokio::test]
    async fn test_get_connect_url_failure_returns_none() {
        let mut api = MockCalendarApi::new();
        api.expect_get_auth_url().returning(|| {
            Err(ApiError::Status {
                status: 500,
                body: "boom".to_string(),
            })
        });

        let mut store = CalendarStore::new(api);
        assert!(store.get_connect_url().await.is_none());
        assert_eq!(store.state().error.as_deref(), Some(CONNECT_URL_FAILED));
    }

    #[tokio::test]
    async fn test_callback_marks_connected() {
        let mut api = MockCalendarApi::new();
        api.expect_handle_callback()
            .withf(|code| code == "auth-code")
            .times(1)
            .returning(|_| Ok(()));

        let mut store = CalendarStore::new(api);
        assert!(store.handle_google_callback("auth-code").await);
        assert!(store.state().is_connected);
    }

    #[tokio::test]
    async fn test_callback_failure() {
        let mut api = MockCalendarApi::new();
        api.expect_handle_callback()
            .returning(|_| Err(ApiError::InvalidInput("empty OAuth code".to_string())));

        let mut store = CalendarStore::new(api);
        assert!(!store.handle_google_callback("").await);
        assert!(!store.state().is_connected);
        assert_eq!(store.state().error.as_deref(), Some(CALLBACK_FAILED));
    }

    #[tokio::test]
    async fn test_disconnect_clears_state() {
        let mut api = MockCalendarApi::new();
        api.expect_calendar_status().returning(|| {
            Ok(CalendarStatus {
                connected: true,
                expires_at: Some("2025-06-01T00:00:00Z".to_string()),
            })
        });
        api.expect_disconnect().times(1).returning(|| Ok(()));

        let mut store = CalendarStore::new(api);
        store.check_connection().await;
        store.disconnect_google().await;

        assert!(!store.state().is_connected);
        assert!(store.state().expires_at.is_none());
        assert!(store.state().error.is_none());
    }

    #[tokio::test]
    async fn test_disconnect_failure_keeps_connection() {
        let mut api = MockCalendarApi::new();
        api.expect_calendar_status().returning(|| {
            Ok(CalendarStatus {
                connected: true,
                expires_at: None,
            })
        });
        api.expect_disconnect()
            .returning(|| Err(ApiError::Unauthorized));

        let mut store = CalendarStore::new(api);
        store.check_connection().await;
        store.disconnect_google().await;

        assert!(store.state().is_connected);
        assert_eq!(store.state().error.as_deref(), Some(DISCONNECT_FAILED));
    }

    #[tokio::test]
    async fn test_get_available_slots_normalizes_date() {
        let mut api = MockCalendarApi::new();
        api.expect_available_slots()
            .with(eq(NaiveDate::from_ymd_opt(2025, 5, 5).unwrap()))
            .times(1)
            .returning(|_| {
                Ok(vec![
                    slot("2025-05-05T08:00:00Z", "2025-05-05T09:00:00Z"),
                    slot("2025-05-05T09:00:00Z", "2025-05-05T10:00:00Z"),
                ])
            });

        let mut store = CalendarStore::new(api);
        store.get_available_slots("2025-05-05T12:30:00Z").await;

        assert_eq!(store.state().selected_date, "2025-05-05");
        assert_eq!(store.state().available_slots.len(), 2);
        assert!(store.state().error.is_none());
        assert!(!store.state().is_loading);
    }

    #[tokio::test]
    async fn test_get_available_slots_failure_empties_slots() {
        let mut api = MockCalendarApi::new();
        let mut first = true;
        api.expect_available_slots().times(2).returning(move |_| {
            if first {
                first = false;
                Ok(vec![slot("2025-05-05T08:00:00Z", "2025-05-05T09:00:00Z")])
            } else {
                Err(ApiError::Unauthorized)
            }
        });

        let mut store = CalendarStore::new(api);
        store.get_available_slots("2025-05-05").await;
        assert_eq!(store.state().available_slots.len(), 1);

        store.get_available_slots("2025-05-06").await;
        assert!(store.state().available_slots.is_empty());
        assert_eq!(store.state().error.as_deref(), Some(SLOTS_FAILED));
    }

    #[tokio::test]
    async fn test_invalid_date_never_reaches_backend() {
        let mut api = MockCalendarApi::new();
        api.expect_available_slots().never();

        let mut store = CalendarStore::new(api);
        let before = store.state().selected_date.clone();
        store.get_available_slots("not-a-date").await;

        assert_eq!(store.state().selected_date, before);
        assert_eq!(store.state().error.as_deref(), Some(SLOTS_FAILED));
    }

    #[tokio::test]
    async fn test_book_event_success() {
        let mut api = MockCalendarApi::new();
        api.expect_book_event()
            .withf(|req| req.summary == "Intro call")
            .times(1)
            .returning(|_| {
                Ok(BookingResponse {
                    success: true,
                    event_id: Some("evt-1".to_string()),
                    message: "Booked".to_string(),
                })
            });

        let mut store = CalendarStore::new(api);
        let response = store.book_event(&booking()).await.unwrap();
        assert!(response.success);
        assert_eq!(response.event_id.as_deref(), Some("evt-1"));
        assert!(store.state().error.is_none());
    }

    #[tokio::test]
    async fn test_book_event_failure_propagates() {
        let mut api = MockCalendarApi::new();
        api.expect_book_event().returning(|_| {
            Err(ApiError::Status {
                status: 409,
                body: "slot taken".to_string(),
            })
        });

        let mut store = CalendarStore::new(api);
        let result = store.book_event(&booking()).await;
        assert!(matches!(result, Err(ApiError::Status { status: 409, .. })));
        assert_eq!(store.state().error.as_deref(), Some(BOOKING_FAILED));
        assert!(!store.state().is_loading);
    }

    #[tokio::test]
    async fn test_formatted_available_slots() {
        let mut api = MockCalendarApi::new();
        api.expect_available_slots().returning(|_| {
            Ok(vec![
                slot("2025-05-05T09:00:00+02:00", "2025-05-05T10:00:00+02:00"),
                slot("garbage", "2025-05-05T11:00:00+02:00"),
            ])
        });

        let mut store = CalendarStore::new(api);
        store.get_available_slots("2025-05-05").await;
        let formatted = store.formatted_available_slots();

        assert_eq!(formatted[0].formatted_time.as_deref(), Some("09:00 - 10:00"));
        assert_eq!(formatted[1].formatted_time.as_deref(), Some("garbage - 11:00"));
        assert!(store.state().available_slots[0].formatted_time.is_none());
    }
}
