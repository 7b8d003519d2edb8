#![no_main]
use libfuzzer_sys::fuzz_target;

/// Fuzz export of editing-model snapshots.
///
/// Snapshots decoded from arbitrary JSON may carry dangling product and
/// family references or cyclic family parents; export must still finish.
fuzz_target!(|data: &[u8]| {
    if let Ok(model) = serde_json::from_slice::<csaf_bridge::EditingModel>(data) {
        let _ = csaf_bridge::export_document_string(&model);
    }
});
