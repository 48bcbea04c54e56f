/// Tests for persisted budget settings
/// These tests cover default fallbacks, validation and the file-backed store

#[cfg(test)]
mod budget_settings_tests {
    use adpacing_core::budgets::{BudgetSettingsService, JsonFileStore, KeyValueStore, MemoryStore};
    use adpacing_core::config::default_monthly_budgets;
    use adpacing_core::{Error, ValidationError};
    use std::collections::HashMap;
    use std::sync::Arc;

    fn memory_service() -> BudgetSettingsService<MemoryStore> {
        BudgetSettingsService::new(Arc::new(MemoryStore::new()), default_monthly_budgets())
    }

    #[test]
    fn test_defaults_apply_until_edited() {
        let service = memory_service();

        assert_eq!(service.monthly_budget("Magical Make An Offer").unwrap(), 500.0);
        assert_eq!(service.daily_set_budget("Magical Make An Offer").unwrap(), 0.0);
        assert_eq!(service.monthly_budget("Unknown App").unwrap(), 0.0);

        service.set_monthly_budget("Magical Make An Offer", 750.0).unwrap();
        service.set_daily_set_budget("Magical Make An Offer", 30.0).unwrap();

        let setting = service.setting("Magical Make An Offer").unwrap();
        assert_eq!(setting.monthly_budget, 750.0);
        assert_eq!(setting.daily_set_budget, 30.0);
    }

    #[test]
    fn test_rejects_negative_and_non_finite_values() {
        let service = memory_service();

        let result = service.set_monthly_budget("X", -1.0);
        assert!(matches!(
            result,
            Err(Error::Validation(ValidationError::InvalidInput(_)))
        ));
        assert!(service.set_daily_set_budget("X", f64::NAN).is_err());
        assert!(service.set_daily_set_budget("X", f64::INFINITY).is_err());
        assert!(service.set_monthly_budget("X", 0.0).is_ok());
    }

    #[test]
    fn test_partial_update_writes_nothing_when_one_value_is_invalid() {
        let service = memory_service();

        assert!(service.update("X", Some(100.0), Some(-5.0)).is_err());
        assert_eq!(service.monthly_budget("X").unwrap(), 0.0);

        let setting = service.update("X", None, Some(5.0)).unwrap();
        assert_eq!(setting.monthly_budget, 0.0);
        assert_eq!(setting.daily_set_budget, 5.0);
    }

    #[test]
    fn test_unparseable_stored_value_falls_back() {
        let store = Arc::new(MemoryStore::new());
        store.set("budget_X", "lots").unwrap();
        let mut defaults = HashMap::new();
        defaults.insert("X".to_string(), 120.0);
        let service = BudgetSettingsService::new(store, defaults);

        assert_eq!(service.monthly_budget("X").unwrap(), 120.0);
    }

    #[test]
    fn test_list_includes_defaults_and_edited_apps() {
        let service = memory_service();
        service.set_daily_set_budget("New App", 12.5).unwrap();

        let all = service.list().unwrap();
        assert_eq!(all.len(), 4);
        assert_eq!(all["New App"].daily_set_budget, 12.5);
        assert_eq!(all["New App"].monthly_budget, 0.0);
        assert_eq!(all["Address Ninja - Validator"].monthly_budget, 500.0);
    }

    #[test]
    fn test_file_store_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("budgets.json");

        {
            let store = Arc::new(JsonFileStore::open(&path).unwrap());
            let service = BudgetSettingsService::new(store, HashMap::new());
            service.set_monthly_budget("X", 900.0).unwrap();
            service.set_daily_set_budget("X", 40.0).unwrap();
        }

        let reopened = Arc::new(JsonFileStore::open(&path).unwrap());
        assert_eq!(
            reopened.list("budget_").unwrap(),
            vec![("budget_X".to_string(), "900".to_string())]
        );
        let service = BudgetSettingsService::new(reopened, HashMap::new());
        assert_eq!(service.monthly_budget("X").unwrap(), 900.0);
        assert_eq!(service.daily_set_budget("X").unwrap(), 40.0);
    }

    #[test]
    fn test_failed_file_write_leaves_no_trace() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("not-a-dir");
        std::fs::write(&blocker, "plain file").unwrap();
        let store = JsonFileStore::open(blocker.join("budgets.json")).unwrap();

        assert!(matches!(store.set("budget_X", "900"), Err(Error::Storage(_))));
        assert_eq!(store.get("budget_X").unwrap(), None);
        assert!(store.list("budget_").unwrap().is_empty());
    }

    #[test]
    fn test_update_is_all_or_nothing_when_persisting_fails() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("not-a-dir");
        std::fs::write(&blocker, "plain file").unwrap();
        let store = Arc::new(JsonFileStore::open(blocker.join("budgets.json")).unwrap());
        let service = BudgetSettingsService::new(store, default_monthly_budgets());

        assert!(service
            .update("Magical Make An Offer", Some(900.0), Some(40.0))
            .is_err());
        let setting = service.setting("Magical Make An Offer").unwrap();
        assert_eq!(setting.monthly_budget, 500.0);
        assert_eq!(setting.daily_set_budget, 0.0);
    }

    #[test]
    fn test_update_writes_both_values_in_one_file_rewrite() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("budgets.json");
        let service = BudgetSettingsService::new(
            Arc::new(JsonFileStore::open(&path).unwrap()),
            HashMap::new(),
        );

        let setting = service.update("X", Some(250.0), Some(12.0)).unwrap();
        assert_eq!(setting.monthly_budget, 250.0);
        assert_eq!(setting.daily_set_budget, 12.0);

        let on_disk: HashMap<String, String> =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(on_disk.get("budget_X").map(String::as_str), Some("250"));
        assert_eq!(on_disk.get("dailyset_X").map(String::as_str), Some("12"));
        assert!(!dir.path().join("budgets.json.tmp").exists());
    }

    #[test]
    fn test_works_behind_a_trait_object() {
        let store: Arc<dyn KeyValueStore> = Arc::new(MemoryStore::new());
        let service = BudgetSettingsService::new(store, HashMap::new());
        service.set_monthly_budget("Y", 10.0).unwrap();
        assert_eq!(service.monthly_budget("Y").unwrap(), 10.0);
    }
}
