use ds_core::{GenerationConfig, HeightMap, HeightmapGenerator, Randomizer};
use js_sys::Function;
use wasm_bindgen::prelude::*;

/// Generate a heightmap from a plain JS config object (same keys as the JSON
/// config; `undefined` or `null` selects every default).
///
/// `randomizer`, when given, is called as `randomizer(base, range)` for every
/// interpolated cell and must return a number. Returns `{ data, max, min }`.
#[wasm_bindgen]
pub fn generate(config: JsValue, randomizer: Option<Function>) -> Result<JsValue, JsValue> {
    let config: GenerationConfig = if config.is_undefined() || config.is_null() {
        GenerationConfig::default()
    } else {
        serde_wasm_bindgen::from_value(config)
            .map_err(|e| JsValue::from_str(&format!("Invalid config: {e}")))?
    };
    run(&config, randomizer)
}

fn run(config: &GenerationConfig, randomizer: Option<Function>) -> Result<JsValue, JsValue> {
    let generator = HeightmapGenerator::new(config);
    let map = match randomizer {
        None => generator.generate(),
        Some(callback) => {
            let mut js = JsRandomizer { callback, error: None };
            let map = generator.generate_injected(&mut js);
            if let Some(err) = js.error {
                return Err(err);
            }
            map
        }
    };
    to_js(&map)
}

fn to_js(map: &HeightMap) -> Result<JsValue, JsValue> {
    serde_wasm_bindgen::to_value(map).map_err(|e| JsValue::from_str(&format!("Cannot convert output: {e}")))
}

/// Forwards displacement to a JS callback. The first exception or non-number
/// result is kept; later cells fall back to the plain average.
struct JsRandomizer {
    callback: Function,
    error: Option<JsValue>,
}

impl Randomizer for JsRandomizer {
    fn displace(&mut self, base: f32, range: f32) -> f32 {
        if self.error.is_some() {
            return base;
        }
        match self.callback.call2(&JsValue::NULL, &base.into(), &range.into()) {
            Ok(v) => match v.as_f64() {
                Some(n) => n as f32,
                None => {
                    self.error = Some(JsValue::from_str("randomizer must return a number"));
                    base
                }
            },
            Err(e) => {
                self.error = Some(e);
                base
            }
        }
    }
}

/// Stateful builder kept for callers of the class-style API:
/// `new Runner(width, height, depth?, rough?).ds()`.
#[wasm_bindgen]
pub struct Runner {
    config: GenerationConfig,
}

#[wasm_bindgen]
impl Runner {
    #[wasm_bindgen(constructor)]
    pub fn new(width: usize, height: usize, depth: Option<f32>, rough: Option<f32>) -> Self {
        let mut config = GenerationConfig { width, height, ..GenerationConfig::default() };
        if let Some(depth) = depth {
            config.depth = depth;
        }
        if let Some(rough) = rough {
            config.rough = rough;
        }
        Self { config }
    }

    #[wasm_bindgen(js_name = setSeed)]
    pub fn set_seed(&mut self, seed: u64) {
        self.config.seed = Some(seed);
    }

    #[wasm_bindgen(js_name = setSmooth)]
    pub fn set_smooth(&mut self, factor: i32) {
        self.config.smooth = factor;
    }

    /// Run one generation with the current settings.
    pub fn ds(&self, randomizer: Option<Function>) -> Result<JsValue, JsValue> {
        run(&self.config, randomizer)
    }
}
