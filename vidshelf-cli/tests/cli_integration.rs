use assert_cmd::Command;
use predicates::str::contains;
use std::error::Error;
use std::fs;
use tempfile::tempdir;

// Helper function to get the path to the compiled binary
fn vidshelf_cmd() -> Command {
    let mut cmd = Command::cargo_bin("vidshelf").expect("Failed to find vidshelf binary");
    cmd.env_remove("VIDSHELF_GALLERY_DIR")
        .env_remove("VIDSHELF_RELATIVE_PATH")
        .env_remove("RUST_LOG");
    cmd
}

#[test]
fn test_save_command_moves_clip_into_gallery() -> Result<(), Box<dyn Error>> {
    let workdir = tempdir()?;
    let gallery = tempdir()?;
    let clip = workdir.path().join("clip.mp4");
    fs::write(&clip, vec![1u8; 4096])?;

    vidshelf_cmd()
        .arg("save")
        .arg("--gallery")
        .arg(gallery.path())
        .arg("--input")
        .arg(&clip)
        .arg("--date-time")
        .arg("2024-01-01T10:00:00")
        .arg("--latitude")
        .arg("37.7749")
        .arg("--longitude")
        .arg("-122.4194")
        .assert()
        .success()
        .stdout(contains("Video saved successfully: gallery://Movies/video_"))
        .stdout(contains("37.7749, -122.4194"));

    assert!(!clip.exists());
    let saved: Vec<_> = fs::read_dir(gallery.path().join("Movies"))?
        .filter_map(Result::ok)
        .map(|e| e.file_name().to_string_lossy().into_owned())
        .filter(|name| !name.starts_with('.'))
        .collect();
    assert_eq!(saved.len(), 1);
    assert!(saved[0].starts_with("video_") && saved[0].ends_with(".mp4"));
    Ok(())
}

#[test]
fn test_save_command_non_existent_input() -> Result<(), Box<dyn Error>> {
    let gallery = tempdir()?;

    vidshelf_cmd()
        .arg("save")
        .arg("--gallery")
        .arg(gallery.path())
        .arg("--input")
        .arg(gallery.path().join("missing.mp4"))
        .assert()
        .failure()
        .stderr(contains("Video file does not exist"));

    Ok(())
}

#[test]
fn test_save_command_honours_relative_path_env() -> Result<(), Box<dyn Error>> {
    let workdir = tempdir()?;
    let gallery = tempdir()?;
    let clip = workdir.path().join("clip.mp4");
    fs::write(&clip, b"frames")?;

    vidshelf_cmd()
        .env("VIDSHELF_GALLERY_DIR", gallery.path())
        .env("VIDSHELF_RELATIVE_PATH", "DCIM/Camera")
        .arg("save")
        .arg("--input")
        .arg(&clip)
        .assert()
        .success()
        .stdout(contains("gallery://DCIM/Camera/video_"));

    assert!(gallery.path().join("DCIM").join("Camera").is_dir());
    Ok(())
}

#[test]
fn test_save_command_rejects_relative_path_without_staging() -> Result<(), Box<dyn Error>> {
    let workdir = tempdir()?;
    let gallery = tempdir()?;
    let clip = workdir.path().join("clip.mp4");
    fs::write(&clip, b"frames")?;

    vidshelf_cmd()
        .arg("save")
        .arg("--gallery")
        .arg(gallery.path())
        .arg("--input")
        .arg(&clip)
        .arg("--relative-path")
        .arg("DCIM/Camera")
        .arg("--no-staging")
        .assert()
        .failure()
        .stderr(contains("cannot be used with"));

    assert!(clip.exists());
    Ok(())
}

#[test]
fn test_save_command_without_staging_lands_at_gallery_root() -> Result<(), Box<dyn Error>> {
    let workdir = tempdir()?;
    let gallery = tempdir()?;
    let clip = workdir.path().join("clip.mp4");
    fs::write(&clip, b"frames")?;

    vidshelf_cmd()
        .arg("save")
        .arg("--gallery")
        .arg(gallery.path())
        .arg("--input")
        .arg(&clip)
        .arg("--no-staging")
        .assert()
        .success()
        .stdout(contains("Video saved successfully: gallery://video_"));

    assert!(!gallery.path().join("Movies").exists());
    Ok(())
}

#[test]
fn test_call_command_success_and_list() -> Result<(), Box<dyn Error>> {
    let workdir = tempdir()?;
    let gallery = tempdir()?;
    let clip = workdir.path().join("clip.mp4");
    fs::write(&clip, b"frames")?;

    let arguments = serde_json::json!({
        "videoPath": clip,
        "dateTime": "2024-01-01T10:00:00",
        "latitude": 0.0,
        "longitude": 0.0,
    });

    vidshelf_cmd()
        .arg("call")
        .arg("--gallery")
        .arg(gallery.path())
        .arg("--arguments")
        .arg(arguments.to_string())
        .assert()
        .success()
        .stdout(contains("\"status\": \"success\""))
        .stdout(contains("Video saved successfully"));

    let output = vidshelf_cmd()
        .arg("list")
        .arg("--gallery")
        .arg(gallery.path())
        .arg("--json")
        .output()?;
    assert!(output.status.success());
    let entries: serde_json::Value = serde_json::from_slice(&output.stdout)?;
    let entries = entries.as_array().ok_or("list output is not an array")?;
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0]["size"], 6);
    assert!(entries[0]["descriptor"].get("latitude").is_none());
    Ok(())
}

#[test]
fn test_call_command_missing_arguments() -> Result<(), Box<dyn Error>> {
    let gallery = tempdir()?;

    vidshelf_cmd()
        .arg("call")
        .arg("--gallery")
        .arg(gallery.path())
        .arg("--arguments")
        .arg(r#"{"videoPath": "/tmp/clip.mp4", "dateTime": "now"}"#)
        .assert()
        .code(2)
        .stdout(contains("INVALID_ARGUMENTS"))
        .stdout(contains("Missing required arguments"));

    Ok(())
}

#[test]
fn test_call_command_save_error() -> Result<(), Box<dyn Error>> {
    let gallery = tempdir()?;
    let arguments = serde_json::json!({
        "videoPath": gallery.path().join("missing.mp4"),
        "dateTime": "now",
        "latitude": 1.0,
        "longitude": 1.0,
    });

    vidshelf_cmd()
        .arg("call")
        .arg("--gallery")
        .arg(gallery.path())
        .arg("--arguments")
        .arg(arguments.to_string())
        .assert()
        .code(1)
        .stdout(contains("SAVE_ERROR"))
        .stdout(contains("Failed to save video"));

    Ok(())
}

#[test]
fn test_call_command_unknown_method() -> Result<(), Box<dyn Error>> {
    let gallery = tempdir()?;

    vidshelf_cmd()
        .arg("call")
        .arg("--gallery")
        .arg(gallery.path())
        .arg("--method")
        .arg("deleteVideo")
        .assert()
        .code(3)
        .stdout(contains("not_implemented"));

    Ok(())
}

#[test]
fn test_call_command_rejects_malformed_json() -> Result<(), Box<dyn Error>> {
    let gallery = tempdir()?;

    vidshelf_cmd()
        .arg("call")
        .arg("--gallery")
        .arg(gallery.path())
        .arg("--arguments")
        .arg("{not json")
        .assert()
        .failure()
        .stderr(contains("Method arguments must be valid JSON"));

    Ok(())
}

#[test]
fn test_list_command_empty_gallery() -> Result<(), Box<dyn Error>> {
    let gallery = tempdir()?;

    vidshelf_cmd()
        .arg("list")
        .arg("--gallery")
        .arg(gallery.path())
        .assert()
        .success()
        .stdout(contains("No entries in gallery"));

    Ok(())
}

#[test]
fn test_log_dir_writes_log_file() -> Result<(), Box<dyn Error>> {
    let gallery = tempdir()?;
    let logs = tempdir()?;

    vidshelf_cmd()
        .arg("list")
        .arg("--gallery")
        .arg(gallery.path())
        .arg("--log-dir")
        .arg(logs.path())
        .assert()
        .success();

    let log_files: Vec<_> = fs::read_dir(logs.path())?
        .filter_map(Result::ok)
        .filter(|e| e.file_name().to_string_lossy().starts_with("vidshelf_"))
        .collect();
    assert_eq!(log_files.len(), 1);
    Ok(())
}
