//! Queue and history behavior of the per-guild playlist.

mod common;

use std::path::Path;

use rstest::rstest;
use test_case::test_case;

use common::song;
use jukebot::commands::music::utils::playlist::{HISTORY_CAPACITY, Playlist};

fn data_dir() -> &'static Path {
    Path::new("data")
}

#[test]
fn queue_is_first_in_first_out() {
    let mut playlist = Playlist::new();
    playlist.add(song("first", data_dir()));
    playlist.add(song("second", data_dir()));
    playlist.add(song("third", data_dir()));

    assert_eq!(playlist.pop().unwrap().title, "first");
    assert_eq!(playlist.pop().unwrap().title, "second");
    assert_eq!(playlist.pop().unwrap().title, "third");
    assert!(playlist.pop().is_none());
}

#[test]
fn history_keeps_only_the_most_recent_songs() {
    let mut playlist = Playlist::new();
    for i in 0..HISTORY_CAPACITY + 3 {
        playlist.add(song(&format!("song-{i}"), data_dir()));
    }
    while playlist.pop().is_some() {}

    let titles: Vec<_> = playlist.history().map(|s| s.title.clone()).collect();
    assert_eq!(titles.len(), HISTORY_CAPACITY);
    // Oldest first, the earliest pops evicted
    assert_eq!(titles.first().unwrap(), "song-3");
    assert_eq!(titles.last().unwrap(), "song-7");
}

#[rstest]
#[case(0, None)]
#[case(1, None)]
#[case(2, Some("song-1"))]
#[case(4, Some("song-1"))]
fn peek_next_is_the_entry_behind_the_front(
    #[case] queue_len: usize,
    #[case] expected: Option<&str>,
) {
    let mut playlist = Playlist::new();
    for i in 0..queue_len {
        playlist.add(song(&format!("song-{i}"), data_dir()));
    }

    assert_eq!(
        playlist.peek_next().map(|s| s.title.as_str()),
        expected
    );
}

#[test]
fn retracted_songs_never_reach_history() {
    let mut playlist = Playlist::new();
    let broken = song("broken", data_dir());
    playlist.add(song("good", data_dir()));
    playlist.add(broken.clone());

    playlist.retract(&broken);
    playlist.pop();

    let titles: Vec<_> = playlist.history().map(|s| s.title.clone()).collect();
    assert_eq!(titles, vec!["good"]);
    assert!(playlist.is_empty());
}

#[test_case(&[false, false] => Some("song-0".to_string()); "nothing fetched yet")]
#[test_case(&[true, false] => Some("song-1".to_string()); "front already fetched")]
#[test_case(&[true, true] => None; "everything fetched")]
fn next_undownloaded_scans_from_the_front(downloaded: &[bool]) -> Option<String> {
    let mut playlist = Playlist::new();
    for (i, &flag) in downloaded.iter().enumerate() {
        let mut s = song(&format!("song-{i}"), data_dir());
        s.downloaded = flag;
        playlist.add(s);
    }
    playlist.next_undownloaded().map(|s| s.title.clone())
}

#[test]
fn current_and_previous_slots_track_promotion() {
    let mut playlist = Playlist::new();
    playlist.add(song("a", data_dir()));
    playlist.add(song("b", data_dir()));

    let first = playlist.pop().unwrap();
    playlist.set_current(first);
    assert_eq!(playlist.current().unwrap().title, "a");

    let finished = playlist.take_current();
    playlist.set_previous(finished);
    let second = playlist.pop().unwrap();
    playlist.set_current(second);

    assert_eq!(playlist.previous().unwrap().title, "a");
    assert_eq!(playlist.current().unwrap().title, "b");
}
