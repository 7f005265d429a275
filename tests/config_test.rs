//! Process-wide configuration API tests.
//!
//! Every test starts from `reset_config()` on its own thread, so parallel tests
//! only share the global layer, which these tests never read back directly.

mod common;

use common::capture_logs;
use dachshund::constants::containers::DATA_CONTAINER_VALUES;
use dachshund::{ConfigUpdate, DataContainer, InvalidArgument};
use proptest::prelude::*;
use serde_json::{Value, json};

fn current() -> Value {
    dachshund::get_config()["data_container"].clone()
}

#[test]
fn test_get_default_config_always_returns_default() {
    dachshund::reset_config();
    let expected = json!({"data_container": "polars"});
    assert_eq!(serde_json::to_value(dachshund::get_default_config()).unwrap(), expected);

    dachshund::set_config(ConfigUpdate::new().data_container("pandas")).unwrap();
    assert_eq!(serde_json::to_value(dachshund::get_default_config()).unwrap(), expected);
    dachshund::reset_config();
}

#[test]
fn test_set_config_then_get_config_returns_expected_value() {
    dachshund::reset_config();
    for name in DATA_CONTAINER_VALUES {
        dachshund::set_config(ConfigUpdate::new().data_container(name)).unwrap();
        assert_eq!(
            serde_json::to_value(dachshund::get_config()).unwrap(),
            json!({"data_container": name}),
        );
    }
    dachshund::reset_config();
}

#[test]
fn test_set_config_with_null_value() {
    dachshund::reset_config();
    let default = dachshund::get_default_config()["data_container"].clone();

    dachshund::set_config(ConfigUpdate::new().data_container(Value::Null)).unwrap();
    assert_eq!(current(), default);

    dachshund::set_config(ConfigUpdate::new().data_container("pandas")).unwrap();
    dachshund::set_config(ConfigUpdate::new().data_container(Value::Null)).unwrap();
    assert_eq!(current(), json!("pandas"));

    dachshund::set_config(ConfigUpdate::new().data_container(default.clone())).unwrap();
    assert_eq!(current(), default);
    dachshund::reset_config();
}

#[test]
fn test_set_config_invalid_values_warn_and_keep_current() {
    dachshund::reset_config();
    for invalid in [json!("False"), json!(7), json!(true), json!(["polars", "pandas"])] {
        let original = dachshund::get_config();
        let (result, logs) = capture_logs(|| {
            dachshund::set_config(ConfigUpdate::new().data_container(invalid.clone()))
        });
        assert!(result.is_ok());
        assert_eq!(logs.warning_count(), 1);
        assert!(
            logs.contents()
                .contains("Attempting to set an invalid value")
        );
        assert_eq!(dachshund::get_config(), original);
    }
    dachshund::reset_config();
}

#[test]
fn test_valid_set_config_is_silent() {
    dachshund::reset_config();
    let (_, logs) = capture_logs(|| {
        dachshund::set_config(ConfigUpdate::new().data_container(DataContainer::Modin)).unwrap()
    });
    assert_eq!(logs.warning_count(), 0);
    dachshund::reset_config();
}

#[test]
fn test_set_config_invalid_keyword_argument() {
    dachshund::reset_config();
    let err = dachshund::set_config(ConfigUpdate::new().param("do_something_else", true))
        .unwrap_err();
    assert!(err.is_invalid_argument());

    let err = ConfigUpdate::parse("true").unwrap_err();
    assert!(matches!(
        err,
        dachshund::DachshundError::InvalidArgument(InvalidArgument::Positional { .. })
    ));

    let update = ConfigUpdate::parse("do_something_else=true").unwrap();
    assert!(dachshund::set_config(update).is_err());
    assert_eq!(current(), json!("polars"));
}

#[test]
fn test_reset_config_resets_the_config() {
    for container in DataContainer::ALL {
        dachshund::set_config(ConfigUpdate::new().data_container(container)).unwrap();
        dachshund::reset_config();
        assert_eq!(dachshund::get_config(), dachshund::get_default_config());
        dachshund::reset_config();
        assert_eq!(dachshund::get_config(), dachshund::get_default_config());
    }
}

#[test]
fn test_config_context() {
    dachshund::reset_config();
    let retrieved = dachshund::get_config();

    for container in DataContainer::ALL {
        let inside =
            dachshund::with_config(ConfigUpdate::new().data_container(container), dachshund::get_config)
                .unwrap();
        assert_eq!(
            serde_json::to_value(inside).unwrap(),
            json!({"data_container": container.as_str()})
        );
        assert_eq!(dachshund::get_config(), retrieved);
    }

    assert!(
        dachshund::config_context(ConfigUpdate::new().param("do_something_else", true))
            .unwrap_err()
            .is_invalid_argument()
    );
    assert_eq!(dachshund::get_config(), retrieved);
}

#[test]
fn test_config_context_exception() {
    dachshund::reset_config();
    let default = dachshund::get_default_config()["data_container"].clone();

    let result = std::panic::catch_unwind(|| {
        let _guard =
            dachshund::config_context(ConfigUpdate::new().data_container("pandas")).unwrap();
        assert_eq!(current(), json!("pandas"));
        panic!("value error");
    });
    assert!(result.is_err());
    assert_eq!(current(), default);
    dachshund::reset_config();
}

#[test]
fn test_nested_config_context() {
    dachshund::reset_config();
    {
        let _a = dachshund::config_context(ConfigUpdate::new().data_container("pandas")).unwrap();
        {
            let _b =
                dachshund::config_context(ConfigUpdate::new().data_container("modin")).unwrap();
            assert_eq!(current(), json!("modin"));
        }
        assert_eq!(current(), json!("pandas"));
    }
    assert_eq!(current(), json!("polars"));
    dachshund::reset_config();
}

#[test]
fn test_config_context_from_toml() {
    dachshund::reset_config();
    let update = ConfigUpdate::from_toml_str(r#"data_container = "polars_eager""#).unwrap();
    {
        let _guard = dachshund::config_context(update).unwrap();
        assert_eq!(
            dachshund::get_config().data_container(),
            Some(DataContainer::PolarsEager)
        );
    }
    assert_eq!(current(), json!("polars"));
}

proptest! {
    #[test]
    fn prop_unknown_strings_never_stored(value in "[a-z_]{1,12}") {
        prop_assume!(!DATA_CONTAINER_VALUES.contains(&value.as_str()));

        let registry = dachshund::ConfigRegistry::builtin();
        registry.set_config(ConfigUpdate::new().data_container("dask")).unwrap();
        registry.set_config(ConfigUpdate::new().data_container(value)).unwrap();
        prop_assert_eq!(registry.get_config().data_container(), Some(DataContainer::Dask));
    }

    #[test]
    fn prop_integers_never_stored(value in any::<i64>()) {
        let registry = dachshund::ConfigRegistry::builtin();
        registry.set_config(ConfigUpdate::new().data_container(value)).unwrap();
        prop_assert_eq!(registry.get_config(), registry.get_default_config());
    }
}
