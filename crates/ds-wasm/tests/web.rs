#![cfg(target_arch = "wasm32")]

use ds_core::HeightMap;
use ds_wasm::{generate, Runner};
use js_sys::{Function, Object, Reflect};
use wasm_bindgen::JsValue;
use wasm_bindgen_test::*;

fn to_map(value: JsValue) -> HeightMap {
    serde_wasm_bindgen::from_value(value).expect("output is a heightmap")
}

fn small_config() -> JsValue {
    let config = Object::new();
    Reflect::set(&config, &"width".into(), &9.into()).unwrap();
    Reflect::set(&config, &"height".into(), &5.into()).unwrap();
    Reflect::set(&config, &"seed".into(), &3.into()).unwrap();
    config.into()
}

#[wasm_bindgen_test]
fn missing_config_uses_defaults() {
    for config in [JsValue::UNDEFINED, JsValue::NULL] {
        let map = to_map(generate(config, None).unwrap());
        assert_eq!(map.width(), 129);
        assert_eq!(map.height(), 129);
    }
}

#[wasm_bindgen_test]
fn callback_output_is_stored() {
    let halve = Function::new_with_args("base, range", "return base / 2;");
    let map = to_map(generate(small_config(), Some(halve)).unwrap());
    assert_eq!((map.width(), map.height()), (9, 5));
    assert!(map.data.iter().flatten().all(|v| v.is_finite()));
}

#[wasm_bindgen_test]
fn throwing_callback_is_returned_as_error() {
    let boom = Function::new_with_args("base, range", "throw new Error('boom');");
    let err = generate(small_config(), Some(boom)).unwrap_err();
    let message = Reflect::get(&err, &"message".into()).unwrap();
    assert_eq!(message.as_string().as_deref(), Some("boom"));
}

#[wasm_bindgen_test]
fn non_number_callback_result_is_an_error() {
    let text = Function::new_with_args("base, range", "return 'high';");
    let err = generate(small_config(), Some(text)).unwrap_err();
    assert_eq!(err.as_string().as_deref(), Some("randomizer must return a number"));
}

#[wasm_bindgen_test]
fn malformed_config_is_an_error() {
    let config = Object::new();
    Reflect::set(&config, &"width".into(), &"wide".into()).unwrap();
    let err = generate(config.into(), None).unwrap_err();
    assert!(err.as_string().unwrap_or_default().starts_with("Invalid config"));
}

#[wasm_bindgen_test]
fn seeded_runner_repeats_itself() {
    let mut runner = Runner::new(17, 9, Some(50.0), Some(0.5));
    runner.set_seed(11);
    runner.set_smooth(1);
    let a = to_map(runner.ds(None).unwrap());
    let b = to_map(runner.ds(None).unwrap());
    assert_eq!((a.width(), a.height()), (17, 9));
    assert_eq!(a, b);
}
