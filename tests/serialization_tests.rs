//! JSON encoding of results, configs and parameters.

mod common;

use common::sample_quotes;
use indexmap::IndexMap;
use qta_core::{DataSeries, FieldAccess, MaType, ParamValue, Params, PriceField, Quotes};
use qta_indicators::prelude::*;
use qta_indicators::registry;

#[test]
fn result_serializes_nan_as_null_in_field_order() {
    let quotes = sample_quotes();
    let result = registry::call("adx", &quotes, &Params::new().with("period", 5)).unwrap();

    let json = serde_json::to_string(&result).unwrap();
    let decoded: IndexMap<String, Vec<Option<f64>>> = serde_json::from_str(&json).unwrap();

    assert_eq!(
        decoded.keys().map(String::as_str).collect::<Vec<_>>(),
        vec!["adx", "p_di", "m_di"]
    );
    let adx = &decoded["adx"];
    assert_eq!(adx.len(), quotes.len());
    // period 5, smooth 14
    assert!(adx[..18].iter().all(Option::is_none));
    assert!(adx[18..].iter().all(Option::is_some));
}

#[test]
fn params_deserialize_from_json_object() {
    let params: Params =
        serde_json::from_str(r#"{"period": 10, "deviation": 1.5, "ma_type": "ema"}"#).unwrap();

    assert_eq!(params.get("period"), Some(&ParamValue::Int(10)));
    assert_eq!(params.get("deviation"), Some(&ParamValue::Float(1.5)));
    assert_eq!(params.get("ma_type"), Some(&ParamValue::Str("ema".to_string())));

    let result = registry::call("bollinger_bands", &sample_quotes(), &params).unwrap();
    assert_eq!(result.field_count(), 4);
}

#[test]
fn config_round_trip() {
    let config = RocConfig::new(7)
        .with_ma_type(MaType::Mma0)
        .with_value(PriceField::High);
    let json = serde_json::to_string(&config).unwrap();
    assert!(json.contains(r#""ma_type":"mma0""#));
    assert!(json.contains(r#""value":"high""#));

    let decoded: RocConfig = serde_json::from_str(&json).unwrap();
    assert_eq!(decoded, config);
}

#[test]
fn misaligned_quotes_json_is_rejected() {
    let json = r#"{
        "open": [1.0],
        "high": [1.0, 2.0, 3.0, 4.0, 5.0],
        "low": [1.0, 2.0, 3.0, 4.0, 5.0],
        "close": [1.0, 2.0, 3.0, 4.0, 5.0]
    }"#;
    let err = serde_json::from_str::<Quotes<f64>>(json).unwrap_err();
    assert!(err.to_string().contains("length mismatch"), "{err}");

    let json = r#"{"open": [1.0, 2.0], "high": [1.0, 2.0], "low": [1.0, 2.0],
        "close": [1.0, 2.0], "volume": [10.0], "time": [1, 2]}"#;
    let err = serde_json::from_str::<Quotes<f64>>(json).unwrap_err();
    assert!(err.to_string().contains("'volume'"), "{err}");

    let json = r#"{"open": [1.0, 2.0], "high": [1.0, 2.0], "low": [1.0, 2.0],
        "close": [1.0, 2.0], "time": [1, 2, 3]}"#;
    let err = serde_json::from_str::<Quotes<f64>>(json).unwrap_err();
    assert!(err.to_string().contains("'time'"), "{err}");
}

#[test]
fn quotes_json_round_trip() {
    let close = [10.0, 10.5, 11.0, 10.25, 12.0];
    let high = [10.5, 11.0, 11.5, 11.0, 12.5];
    let low = [9.5, 10.0, 10.5, 10.0, 11.0];
    let quotes = Quotes::from_arrays(&close, &high, &low, &close)
        .unwrap()
        .with_volume(&[100.0, 200.0, 150.0, 300.0, 250.0])
        .unwrap()
        .with_time(&[1_000, 2_000, 3_000, 4_000, 5_000])
        .unwrap();
    let json = serde_json::to_string(&quotes).unwrap();
    let decoded: Quotes<f64> = serde_json::from_str(&json).unwrap();
    assert_eq!(decoded, quotes);

    let result = registry::call(
        "roc",
        &decoded,
        &Params::new().with("period", 2).with("value", "open"),
    )
    .unwrap();
    assert_eq!(result.len(), decoded.len());
}

#[test]
fn misaligned_data_series_json_is_rejected() {
    let err = serde_json::from_str::<DataSeries<f64>>(r#"{"a": [1.0, 2.0], "b": [1.0]}"#)
        .unwrap_err();
    assert!(err.to_string().contains("'b'"), "{err}");

    let data: DataSeries<f64> =
        serde_json::from_str(r#"{"a": [1.0, 2.0], "b": [3.0, 4.0]}"#).unwrap();
    assert_eq!(data.field_names(), vec!["a", "b"]);
    assert_eq!(data.field("b").unwrap()[1], 4.0);
}
