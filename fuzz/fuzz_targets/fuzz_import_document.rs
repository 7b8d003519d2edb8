#![no_main]
use libfuzzer_sys::fuzz_target;

/// Fuzz the text import entry point.
///
/// Feeds arbitrary UTF-8 strings to `import_document_str`, which runs shape
/// detection, CSAF decoding, family extraction and reference resolution.
fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        let _ = csaf_bridge::import_document_str(s);
    }
});
