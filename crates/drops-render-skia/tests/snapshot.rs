// File: crates/drops-render-skia/tests/snapshot.rs
// Purpose: Golden snapshot of the raster layer with bless flow.
// Behavior:
// - Draws the four-bucket fixture and encodes only the raster surface (no text).
// - If env UPDATE_SNAPSHOTS=1, (re)writes the snapshot file.
// - Else, if the snapshot exists, compares decoded pixels for exact match.
// - Else, logs a note and returns without failing.

mod common;

use common::orchestrator;
use drops_core::Evaluation;

#[test]
fn golden_stacked_bars() {
    let mut orch = orchestrator();
    assert_eq!(orch.evaluate(), Evaluation::Rendered);
    let (_, _, raster) = orch.surfaces_mut().expect("surfaces mounted");
    let bytes = raster.encode_png().expect("encode raster");

    let snap_dir = std::path::PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/__snapshots__");
    let snap_path = snap_dir.join("stacked_bars.png");
    let update = std::env::var("UPDATE_SNAPSHOTS")
        .ok()
        .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
        .unwrap_or(false);

    if update {
        std::fs::create_dir_all(&snap_dir).expect("create snapshots dir");
        std::fs::write(&snap_path, &bytes).expect("write snapshot");
        eprintln!("[snapshot] Updated {} ({} bytes)", snap_path.display(), bytes.len());
        return;
    }

    if snap_path.exists() {
        let want = std::fs::read(&snap_path).expect("read snapshot");
        let got_img = image::load_from_memory(&bytes).expect("decode got").to_rgba8();
        let want_img = image::load_from_memory(&want).expect("decode want").to_rgba8();
        assert_eq!(
            got_img.as_raw(),
            want_img.as_raw(),
            "raster pixels differ from golden snapshot: {}",
            snap_path.display()
        );
    } else {
        eprintln!("[snapshot] Missing snapshot {}; set UPDATE_SNAPSHOTS=1 to bless.", snap_path.display());
    }
}
