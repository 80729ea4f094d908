use crate::dictionary::PrefixDictionary;
use crate::grid::Grid;
use crate::log::init_logger;
use crate::puzzle::PuzzleError;
use crate::search::{scan_all_with, ScanOptions, ScanStatus};
use crate::word_list::WordList;
use std::time::Duration;
use wasm_bindgen::prelude::*;

/// Structured error information for JavaScript consumers
#[derive(serde::Serialize)]
struct WasmError {
    /// Error code (e.g., "E001", "P002")
    code: String,
    /// Display message
    message: String,
    /// Optional helpful suggestion
    #[serde(skip_serializing_if = "Option::is_none")]
    help: Option<String>,
}

impl From<PuzzleError> for WasmError {
    fn from(e: PuzzleError) -> Self {
        // For ParseFailure, surface the nested ParseError
        match &e {
            PuzzleError::ParseFailure(pe) => WasmError {
                code: pe.code().to_string(),
                message: pe.to_string(),
                help: pe.help().map(str::to_string),
            },
            _ => WasmError {
                code: e.code().to_string(),
                message: e.to_string(),
                help: e.help().map(str::to_string),
            },
        }
    }
}

impl From<WasmError> for JsValue {
    fn from(e: WasmError) -> Self {
        let mut msg = format!("Error {}: {}", e.code, e.message);
        if let Some(help) = e.help {
            msg.push_str(&format!("\n\nSuggestion: {help}"));
        }
        js_sys::Error::new(&msg).into()
    }
}

#[derive(serde::Serialize)]
struct WasmScanResult {
    words: Vec<String>,
    status: String,
}

/// Initialize logging; call once from JavaScript after the module loads.
#[wasm_bindgen]
pub fn initialize(debug_enabled: bool) {
    console_error_panic_hook::set_once();
    init_logger(debug_enabled);
    log::info!("WASM module initialized");
}

/// JS entry: (grid_text: string, words: string[], min_length: number, time_budget_secs: number)
/// returns `{ words: string[], status: string }`
///
/// A `time_budget_secs` that is not a positive number means no limit.
/// Grid and words are both uppercased, so case does not matter.
#[wasm_bindgen]
pub fn solve_grid_wasm(
    grid_text: &str,
    words: JsValue,
    min_length: usize,
    time_budget_secs: f64,
) -> Result<JsValue, JsValue> {
    let words: Vec<String> = serde_wasm_bindgen::from_value(words).map_err(|e| WasmError {
        code: "WASM001".to_string(),
        message: format!("words must be string[]: {e}"),
        help: Some("Pass a string array, e.g. ['cat', 'dog']".to_string()),
    })?;
    let word_list = WordList::parse_from_str(&words.join("\n"));

    let grid: Grid = grid_text.parse().map_err(|e| WasmError::from(PuzzleError::ParseFailure(e)))?;
    let dictionary = PrefixDictionary::build(&word_list.words, min_length);
    let mut options = ScanOptions::default();
    if time_budget_secs.is_finite() && time_budget_secs > 0.0 {
        options = options.with_time_budget(Duration::from_secs_f64(time_budget_secs));
    }
    let result = scan_all_with(&grid, &dictionary, &options, |_| {});

    let status = match result.status {
        ScanStatus::Exhausted => "exhausted".to_string(),
        ScanStatus::TimedOut { .. } => "timed_out".to_string(),
    };

    serde_wasm_bindgen::to_value(&WasmScanResult { words: result.words, status }).map_err(|e| {
        WasmError {
            code: "WASM002".to_string(),
            message: format!("serialization failed: {e}"),
            help: None,
        }
        .into()
    })
}
