use super::scan::is_audio_file;
use super::*;
use crate::config::LibrarySettings;
use std::fs;
use std::path::Path;
use tempfile::tempdir;

fn write_wav(path: &Path) {
    let spec = hound::WavSpec {
        channels: 1,
        sample_rate: 4_000,
        bits_per_sample: 16,
        sample_format: hound::SampleFormat::Int,
    };
    let mut writer = hound::WavWriter::create(path, spec).unwrap();
    for _ in 0..400 {
        writer.write_sample(0i16).unwrap();
    }
    writer.finalize().unwrap();
}

fn titles(dir: &Path, settings: &LibrarySettings) -> Vec<String> {
    scan(dir, settings)
        .iter()
        .map(|t| t.title().to_string())
        .collect()
}

#[test]
fn is_audio_file_matches_configured_extensions_case_insensitive() {
    let settings = LibrarySettings::default();
    assert!(is_audio_file(Path::new("/tmp/a.mp3"), &settings));
    assert!(is_audio_file(Path::new("/tmp/a.MP3"), &settings));
    assert!(is_audio_file(Path::new("/tmp/a.wav"), &settings));
    assert!(is_audio_file(Path::new("/tmp/a.ogg"), &settings));
    assert!(!is_audio_file(Path::new("/tmp/a.flac"), &settings));
    assert!(!is_audio_file(Path::new("/tmp/a.txt"), &settings));
    assert!(!is_audio_file(Path::new("/tmp/a"), &settings));

    let dotted = LibrarySettings {
        extensions: vec![" .WAV ".into()],
        ..LibrarySettings::default()
    };
    assert!(is_audio_file(Path::new("/tmp/a.wav"), &dotted));
    assert!(!is_audio_file(Path::new("/tmp/a.mp3"), &dotted));
}

#[test]
fn scan_filters_non_audio_and_orders_by_file_name() {
    let dir = tempdir().unwrap();
    write_wav(&dir.path().join("b - Second.wav"));
    write_wav(&dir.path().join("a - First.WAV"));
    fs::write(dir.path().join("c.txt"), b"ignore me").unwrap();

    let tracks = scan(dir.path(), &LibrarySettings::default());
    assert_eq!(tracks.len(), 2);
    assert_eq!(tracks[0].author(), "a");
    assert_eq!(tracks[0].title(), "First");
    assert_eq!(tracks[1].title(), "Second");
    assert!(tracks.iter().all(|t| t.duration() == Some(std::time::Duration::from_millis(100))));
}

#[test]
fn scan_skips_files_the_factory_rejects() {
    let dir = tempdir().unwrap();
    write_wav(&dir.path().join("good.wav"));
    fs::write(dir.path().join("broken.wav"), b"not a wav header").unwrap();

    assert_eq!(titles(dir.path(), &LibrarySettings::default()), vec!["good"]);
}

#[test]
fn scan_respects_include_hidden_false() {
    let dir = tempdir().unwrap();
    write_wav(&dir.path().join(".hidden.wav"));
    write_wav(&dir.path().join("visible.wav"));
    let hidden_dir = dir.path().join(".cache");
    fs::create_dir_all(&hidden_dir).unwrap();
    write_wav(&hidden_dir.join("inner.wav"));

    let settings = LibrarySettings {
        include_hidden: false,
        ..LibrarySettings::default()
    };
    assert_eq!(titles(dir.path(), &settings), vec!["visible"]);

    let settings = LibrarySettings {
        include_hidden: true,
        ..LibrarySettings::default()
    };
    assert_eq!(titles(dir.path(), &settings).len(), 3);
}

#[test]
fn scan_respects_recursive_false() {
    let dir = tempdir().unwrap();
    write_wav(&dir.path().join("root.wav"));
    let sub = dir.path().join("sub");
    fs::create_dir_all(&sub).unwrap();
    write_wav(&sub.join("child.wav"));

    let settings = LibrarySettings {
        recursive: false,
        ..LibrarySettings::default()
    };
    assert_eq!(titles(dir.path(), &settings), vec!["root"]);
}

#[test]
fn scan_respects_max_depth() {
    let dir = tempdir().unwrap();
    let d1 = dir.path().join("d1");
    let d2 = d1.join("d2");
    fs::create_dir_all(&d2).unwrap();
    write_wav(&dir.path().join("root.wav"));
    write_wav(&d1.join("one.wav"));
    write_wav(&d2.join("two.wav"));

    // WalkDir depth counts root as 0, children as 1, grandchildren as 2...
    let settings = LibrarySettings {
        max_depth: Some(2),
        ..LibrarySettings::default()
    };
    let names = titles(dir.path(), &settings);
    assert!(names.contains(&"root".to_string()));
    assert!(names.contains(&"one".to_string()));
    assert!(!names.contains(&"two".to_string()));
}

#[test]
fn scan_of_missing_directory_is_empty() {
    let dir = tempdir().unwrap();
    assert!(scan(&dir.path().join("nope"), &LibrarySettings::default()).is_empty());
}
