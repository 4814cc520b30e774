//! Per-guild song queue: a FIFO of upcoming songs, the currently playing
//! song, and a bounded buffer of recently played ones.

use std::collections::HashSet;
use std::collections::VecDeque;

use crate::commands::music::audio_sources::Song;

/// How many recently played songs are kept for `/history`.
pub const HISTORY_CAPACITY: usize = 5;

#[derive(Default)]
pub struct Playlist {
    current: Option<Song>,
    previous: Option<Song>,
    queue: VecDeque<Song>,
    history: VecDeque<Song>,
}

impl Playlist {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a song to the back of the queue.
    pub fn add(&mut self, song: Song) {
        self.queue.push_back(song);
    }

    /// Remove and return the front of the queue, recording it into history.
    /// The oldest history entry is evicted once the buffer holds
    /// `HISTORY_CAPACITY` songs.
    pub fn pop(&mut self) -> Option<Song> {
        let song = self.queue.pop_front()?;
        if self.history.len() == HISTORY_CAPACITY {
            self.history.pop_front();
        }
        self.history.push_back(song.clone());
        Some(song)
    }

    /// Remove the first queue entry with the same video ID, without recording
    /// it into history. Used to back out a song that failed to download.
    pub fn retract(&mut self, song: &Song) {
        if let Some(index) = self
            .queue
            .iter()
            .position(|queued| queued.video_id == song.video_id)
        {
            self.queue.remove(index);
        }
    }

    /// The entry after the queue front, if any.
    pub fn peek_next(&self) -> Option<&Song> {
        self.queue.get(1)
    }

    /// The queue front, without removing it.
    pub fn front(&self) -> Option<&Song> {
        self.queue.front()
    }

    /// Linear scan from the front for the first entry that has not been
    /// downloaded yet.
    pub fn next_undownloaded(&self) -> Option<&Song> {
        self.queue.iter().find(|song| !song.downloaded)
    }

    /// Flip the downloaded flag on the matching queued entry (and on the
    /// current song, if it matches). Clones of a song circulate, so the
    /// playlist is the source of truth for this flag.
    pub fn mark_downloaded(&mut self, video_id: &str) {
        for song in self.queue.iter_mut() {
            if song.video_id == video_id {
                song.downloaded = true;
            }
        }
        if let Some(current) = self.current.as_mut() {
            if current.video_id == video_id {
                current.downloaded = true;
            }
        }
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn current(&self) -> Option<&Song> {
        self.current.as_ref()
    }

    pub fn set_current(&mut self, song: Song) {
        self.current = Some(song);
    }

    pub fn take_current(&mut self) -> Option<Song> {
        self.current.take()
    }

    pub fn clear_current(&mut self) {
        self.current = None;
    }

    pub fn set_previous(&mut self, song: Option<Song>) {
        self.previous = song;
    }

    pub fn previous(&self) -> Option<&Song> {
        self.previous.as_ref()
    }

    /// Upcoming songs in playback order.
    pub fn songs(&self) -> impl Iterator<Item = &Song> {
        self.queue.iter()
    }

    /// Recently played songs, oldest first.
    pub fn history(&self) -> impl Iterator<Item = &Song> {
        self.history.iter()
    }

    /// File names that must survive a disk-hygiene pass: everything still
    /// queued plus whatever is playing right now.
    pub fn retained_files(&self) -> HashSet<String> {
        self.queue
            .iter()
            .map(|song| song.file_name.clone())
            .chain(self.current.iter().map(|song| song.file_name.clone()))
            .collect()
    }
}
