use std::path::PathBuf;

#[test]
fn binary_writes_default_banner_in_working_dir() {
    let dir = tempfile::tempdir().unwrap();

    let exe = std::env::var_os("CARGO_BIN_EXE_wavebanner")
        .map(PathBuf::from)
        .unwrap_or_else(|| {
            let mut p = std::env::current_dir()
                .unwrap()
                .join("target")
                .join("debug");
            p.push(if cfg!(windows) {
                "wavebanner.exe"
            } else {
                "wavebanner"
            });
            p
        });

    let status = std::process::Command::new(exe)
        .current_dir(dir.path())
        .status()
        .unwrap();

    assert!(status.success());
    let out = dir.path().join("banner.png");
    assert!(out.exists());
    let img = image::open(&out).unwrap();
    assert_eq!((img.width(), img.height()), (4752, 1188));
}
