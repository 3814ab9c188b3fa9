//! Simplified ID3 tag access: a small human-readable view for the
//! inspector, and a three-field writer for MP3 files.

use std::collections::BTreeMap;
use std::path::Path;

use id3::frame::Content;
use id3::{Tag, TagLike, Version};
use medialab_core::{MediaError, MediaResult};

/// Read the simplified tag view: common descriptive frames mapped to
/// friendly names. Frames that are absent are omitted.
pub fn read_tag_view(path: &Path) -> MediaResult<BTreeMap<String, String>> {
    let tag = Tag::read_from_path(path).map_err(|e| MediaError::Tag(e.to_string()))?;

    let mut view = BTreeMap::new();

    let mut put = |key: &str, value: Option<String>| {
        if let Some(v) = value {
            if !v.trim().is_empty() {
                view.insert(key.to_string(), v);
            }
        }
    };

    put("title", tag.title().map(str::to_owned));
    put("artist", tag.artist().map(str::to_owned));
    put("album", tag.album().map(str::to_owned));
    put("albumartist", text_frame(&tag, "TPE2"));
    put("composer", text_frame(&tag, "TCOM"));
    put("genre", tag.genre().map(str::to_owned));
    put(
        "date",
        text_frame(&tag, "TDRC").or_else(|| text_frame(&tag, "TYER")),
    );
    put("tracknumber", tag.track().map(|n| n.to_string()));
    put("discnumber", tag.disc().map(|n| n.to_string()));

    Ok(view)
}

/// Write title/artist/album to an MP3 file in place.
///
/// Non-MP3 paths are rejected up front without touching the file.
pub fn write_basic_tags(path: &Path, title: &str, artist: &str, album: &str) -> MediaResult<()> {
    let is_mp3 = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.eq_ignore_ascii_case("mp3"))
        .unwrap_or(false);

    if !is_mp3 {
        return Err(MediaError::Validation(
            "Only MP3 files are supported for adding metadata".to_string(),
        ));
    }

    // Load existing tag if possible; otherwise start fresh.
    let mut tag = Tag::read_from_path(path).unwrap_or_else(|_| Tag::new());

    tag.set_title(title);
    tag.set_artist(artist);
    tag.set_album(album);

    tag.write_to_path(path, Version::Id3v24)
        .map_err(|e| MediaError::Tag(e.to_string()))?;

    tracing::info!(path = %path.display(), "Wrote ID3 tags");
    Ok(())
}

/// Best-effort string value from a text-ish frame id.
fn text_frame(tag: &Tag, id: &str) -> Option<String> {
    let frame = tag.get(id)?;
    match frame.content() {
        Content::Text(s) => Some(s.clone()),
        Content::Link(s) => Some(s.clone()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn rejects_non_mp3_extension_without_touching_the_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("song.wav");
        fs::write(&path, b"RIFF....WAVE").unwrap();
        let before = fs::read(&path).unwrap();

        let err = write_basic_tags(&path, "T", "A", "B").unwrap_err();
        assert!(err.is_validation());
        assert!(err.to_string().contains("Only MP3 files are supported"));
        assert_eq!(fs::read(&path).unwrap(), before);
    }

    #[test]
    fn extension_check_is_case_insensitive() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("song.MP3");
        fs::write(&path, b"").unwrap();

        write_basic_tags(&path, "Title", "Artist", "Album").unwrap();
    }

    #[test]
    fn written_tags_round_trip_through_the_view() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("song.mp3");
        fs::write(&path, b"").unwrap();

        write_basic_tags(&path, "Night Drive", "The Examples", "Retrieval").unwrap();

        let view = read_tag_view(&path).unwrap();
        assert_eq!(view.get("title").map(String::as_str), Some("Night Drive"));
        assert_eq!(view.get("artist").map(String::as_str), Some("The Examples"));
        assert_eq!(view.get("album").map(String::as_str), Some("Retrieval"));
    }

    #[test]
    fn missing_tag_is_a_tag_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("untagged.mp3");
        fs::write(&path, b"\xff\xfb\x90\x00").unwrap();

        let err = read_tag_view(&path).unwrap_err();
        assert!(matches!(err, MediaError::Tag(_)));
    }
}
