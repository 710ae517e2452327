//! Binding to the Web Speech API (`SpeechRecognition` / `webkitSpeechRecognition`)
//!
//! web-sys only exposes the standard constructor behind unstable flags, and
//! Chromium/Safari still ship the prefixed one, so the object is driven
//! through `Reflect`.

use super::session::RecognitionSegment;
use js_sys::{Array, Function, Reflect};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};

const CONSTRUCTOR_NAMES: [&str; 2] = ["SpeechRecognition", "webkitSpeechRecognition"];

fn recognition_constructor() -> Option<Function> {
    let window = web_sys::window()?;
    CONSTRUCTOR_NAMES.iter().find_map(|name| {
        Reflect::get(&window, &JsValue::from_str(name))
            .ok()
            .filter(|value| value.is_function())
            .map(|value| value.unchecked_into::<Function>())
    })
}

/// Whether this browser has a speech recognition implementation
pub fn is_speech_supported() -> bool {
    recognition_constructor().is_some()
}

pub struct RecognizerHandlers {
    pub on_result: Box<dyn FnMut(Vec<RecognitionSegment>)>,
    pub on_error: Box<dyn FnMut(String)>,
    pub on_end: Box<dyn FnMut()>,
}

/// Live recognition object plus the closures it calls back into.
///
/// Dropping it detaches the handlers and aborts the recognition, so no
/// callback can fire into a disposed component.
pub struct BrowserRecognizer {
    recognition: JsValue,
    _on_result: Closure<dyn FnMut(JsValue)>,
    _on_error: Closure<dyn FnMut(JsValue)>,
    _on_end: Closure<dyn FnMut(JsValue)>,
}

fn set_prop(target: &JsValue, name: &str, value: &JsValue) -> Result<(), String> {
    Reflect::set(target, &JsValue::from_str(name), value)
        .map(|_| ())
        .map_err(|e| format!("Failed to set {}: {:?}", name, e))
}

fn call_method(target: &JsValue, name: &str) -> Result<(), String> {
    let method = Reflect::get(target, &JsValue::from_str(name))
        .map_err(|e| format!("{:?}", e))?
        .dyn_into::<Function>()
        .map_err(|_| format!("{} is not a function", name))?;
    method
        .call0(target)
        .map(|_| ())
        .map_err(|e| format!("{}() failed: {:?}", name, e))
}

/// Read `event.results` from `event.resultIndex` on
fn read_segments(event: &JsValue) -> Vec<RecognitionSegment> {
    let get = |target: &JsValue, key: &str| Reflect::get(target, &JsValue::from_str(key)).ok();

    let start = get(event, "resultIndex")
        .and_then(|v| v.as_f64())
        .unwrap_or(0.0) as u32;
    let Some(results) = get(event, "results") else {
        return Vec::new();
    };
    let length = get(&results, "length")
        .and_then(|v| v.as_f64())
        .unwrap_or(0.0) as u32;

    (start..length)
        .filter_map(|i| {
            let result = Reflect::get_u32(&results, i).ok()?;
            let is_final = get(&result, "isFinal")
                .and_then(|v| v.as_bool())
                .unwrap_or(false);
            let best = Reflect::get_u32(&result, 0).ok()?;
            let text = get(&best, "transcript")?.as_string()?;
            Some(RecognitionSegment { text, is_final })
        })
        .collect()
}

impl BrowserRecognizer {
    pub fn new(lang: &str, handlers: RecognizerHandlers) -> Result<Self, String> {
        let constructor =
            recognition_constructor().ok_or_else(|| "Speech recognition is not supported".to_string())?;
        let recognition = Reflect::construct(&constructor, &Array::new())
            .map_err(|e| format!("Failed to create speech recognition: {:?}", e))?;

        set_prop(&recognition, "continuous", &JsValue::TRUE)?;
        set_prop(&recognition, "interimResults", &JsValue::TRUE)?;
        set_prop(&recognition, "lang", &JsValue::from_str(lang))?;

        let RecognizerHandlers {
            mut on_result,
            mut on_error,
            mut on_end,
        } = handlers;

        let result_closure = Closure::wrap(Box::new(move |event: JsValue| {
            on_result(read_segments(&event));
        }) as Box<dyn FnMut(JsValue)>);

        let error_closure = Closure::wrap(Box::new(move |event: JsValue| {
            let code = Reflect::get(&event, &JsValue::from_str("error"))
                .ok()
                .and_then(|v| v.as_string())
                .unwrap_or_else(|| "unknown".to_string());
            on_error(code);
        }) as Box<dyn FnMut(JsValue)>);

        let end_closure = Closure::wrap(Box::new(move |_event: JsValue| {
            on_end();
        }) as Box<dyn FnMut(JsValue)>);

        set_prop(&recognition, "onresult", result_closure.as_ref())?;
        set_prop(&recognition, "onerror", error_closure.as_ref())?;
        set_prop(&recognition, "onend", end_closure.as_ref())?;

        Ok(Self {
            recognition,
            _on_result: result_closure,
            _on_error: error_closure,
            _on_end: end_closure,
        })
    }

    pub fn start(&self) -> Result<(), String> {
        call_method(&self.recognition, "start")
    }

    /// Graceful stop: pending audio is still recognized, then `end` fires
    pub fn stop(&self) {
        if let Err(e) = call_method(&self.recognition, "stop") {
            log::warn!("Speech recognition stop: {}", e);
        }
    }

    pub fn abort(&self) {
        if let Err(e) = call_method(&self.recognition, "abort") {
            log::warn!("Speech recognition abort: {}", e);
        }
    }
}

impl Drop for BrowserRecognizer {
    fn drop(&mut self) {
        for handler in ["onresult", "onerror", "onend"] {
            let _ = set_prop(&self.recognition, handler, &JsValue::NULL);
        }
        let _ = call_method(&self.recognition, "abort");
    }
}
