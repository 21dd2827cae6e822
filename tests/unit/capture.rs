use super::*;

fn temp_dir(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!(
        "visaudit_{name}_{}_{}",
        std::process::id(),
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_nanos()
    ))
}

#[test]
fn args_match_playwright_cli() {
    let req = CaptureRequest::new("https://example.com").with_viewport(800, 600);
    let args = req.args(Path::new("/tmp/out/original.png"));
    let args: Vec<_> = args.iter().map(|a| a.to_string_lossy().into_owned()).collect();
    assert_eq!(
        args,
        [
            "playwright",
            "screenshot",
            "--viewport-size",
            "800,600",
            "https://example.com",
            "/tmp/out/original.png",
        ]
    );
}

#[test]
fn full_page_flag_precedes_url() {
    let req = CaptureRequest::new("http://localhost:3000").with_full_page(true);
    let args = req.args(Path::new("shot.png"));
    assert_eq!(args[3], "1920,1080");
    assert_eq!(args[4], "--full-page");
    assert_eq!(args[5], "http://localhost:3000");
}

#[test]
fn invalid_requests_are_rejected_before_spawning() {
    let cap = PlaywrightCapture::default().with_program("/nonexistent/visaudit-npx");
    let dest = temp_dir("capture_invalid").join("shot.png");

    let err = cap.capture(&CaptureRequest::new("  "), &dest).unwrap_err();
    assert!(err.to_string().starts_with("validation error:"));

    let zero = CaptureRequest::new("https://example.com").with_viewport(0, 10);
    assert!(cap.capture(&zero, &dest).is_err());
}

#[test]
fn missing_launcher_is_a_capture_error() {
    let cap = PlaywrightCapture::default().with_program("/nonexistent/visaudit-npx");
    assert!(!cap.is_available());

    let dest = temp_dir("capture_missing").join("shot.png");
    let err = cap
        .capture(&CaptureRequest::new("https://example.com"), &dest)
        .unwrap_err();
    let msg = err.to_string();
    assert!(msg.starts_with("capture error:"), "{msg}");
    assert!(msg.contains("not found"), "{msg}");
}

#[cfg(unix)]
#[test]
fn failing_launcher_reports_install_hint() {
    let cap = PlaywrightCapture::default().with_program("false");
    let dest = temp_dir("capture_fail").join("shot.png");
    let err = cap
        .capture(&CaptureRequest::new("https://example.com"), &dest)
        .unwrap_err();
    assert!(err.to_string().contains(INSTALL_HINT));
}

#[cfg(unix)]
#[test]
fn launcher_that_writes_nothing_is_a_capture_error() {
    let cap = PlaywrightCapture::default().with_program("true");
    let dest = temp_dir("capture_empty").join("shot.png");
    let err = cap
        .capture(&CaptureRequest::new("https://example.com"), &dest)
        .unwrap_err();
    let msg = err.to_string();
    assert!(msg.starts_with("capture error:"), "{msg}");
    assert!(msg.contains("could not be decoded"), "{msg}");
}
