// Streams the words a single speaker produces in one transcript document.
//
// A word is a text node directly inside a `w` element that sits somewhere under
// a `u` element whose `who` attribute names the speaker. Element names compare
// by local name, so namespaced documents match too.

use std::fs::File;
use std::io::BufRead;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

use crate::error::{CurError, Result};

const UTTERANCE: &[u8] = b"u";
const WORD: &[u8] = b"w";
const SPEAKER_ATTR: &str = "who";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Frame {
    SpeakerUtterance,
    Word,
    Other,
}

pub struct ChildWords<R> {
    reader: Reader<R>,
    path: PathBuf,
    speaker: String,
    buf: Vec<u8>,
    stack: Vec<Frame>,
    // Open utterances by the speaker on the stack.
    utterance_depth: usize,
    seen_root: bool,
    done: bool,
}

impl ChildWords<BufReader<File>> {
    pub fn open<P: AsRef<Path>>(path: P, speaker: &str) -> Result<Self> {
        let path = path.as_ref();
        let reader = Reader::from_file(path).map_err(|e| CurError::document(path, e))?;
        Ok(Self::new(reader, path, speaker))
    }
}

impl<R: BufRead> ChildWords<R> {
    pub fn new(reader: Reader<R>, path: impl Into<PathBuf>, speaker: &str) -> Self {
        Self {
            reader,
            path: path.into(),
            speaker: speaker.to_string(),
            buf: Vec::new(),
            stack: Vec::new(),
            utterance_depth: 0,
            seen_root: false,
            done: false,
        }
    }

    fn next_word(&mut self) -> Result<Option<String>> {
        loop {
            self.buf.clear();
            let event = self
                .reader
                .read_event_into(&mut self.buf)
                .map_err(|e| CurError::document(&self.path, e))?;
            let in_word = self.utterance_depth > 0 && self.stack.last() == Some(&Frame::Word);
            match event {
                Event::Start(start) => {
                    self.seen_root = true;
                    let frame = match start.local_name().as_ref() {
                        UTTERANCE if is_spoken_by(&start, &self.speaker, &self.path)? => {
                            Frame::SpeakerUtterance
                        }
                        WORD => Frame::Word,
                        _ => Frame::Other,
                    };
                    if frame == Frame::SpeakerUtterance {
                        self.utterance_depth += 1;
                    }
                    self.stack.push(frame);
                }
                Event::Empty(_) => self.seen_root = true,
                Event::End(_) => match self.stack.pop() {
                    Some(Frame::SpeakerUtterance) => self.utterance_depth -= 1,
                    Some(_) => {}
                    None => return Err(CurError::document(&self.path, "unexpected closing tag")),
                },
                Event::Text(text) if in_word => {
                    let text = text
                        .unescape()
                        .map_err(|e| CurError::document(&self.path, e))?;
                    if let Some(word) = as_token(&text) {
                        return Ok(Some(word));
                    }
                }
                Event::CData(cdata) if in_word => {
                    let text = cdata
                        .decode()
                        .map_err(|e| CurError::document(&self.path, e))?;
                    if let Some(word) = as_token(&text) {
                        return Ok(Some(word));
                    }
                }
                Event::Eof => {
                    if !self.stack.is_empty() {
                        return Err(CurError::document(
                            &self.path,
                            format!("{} unclosed element(s) at end of file", self.stack.len()),
                        ));
                    }
                    if !self.seen_root {
                        return Err(CurError::document(&self.path, "document has no root element"));
                    }
                    return Ok(None);
                }
                _ => {}
            }
        }
    }
}

fn as_token(text: &str) -> Option<String> {
    let token = text.trim();
    if token.is_empty() {
        None
    } else {
        Some(token.to_string())
    }
}

fn is_spoken_by(start: &BytesStart, speaker: &str, path: &Path) -> Result<bool> {
    let attr = start
        .try_get_attribute(SPEAKER_ATTR)
        .map_err(|e| CurError::document(path, e))?;
    match attr {
        Some(attr) => {
            let who = attr
                .unescape_value()
                .map_err(|e| CurError::document(path, e))?;
            Ok(who == speaker)
        }
        None => Ok(false),
    }
}

// Stops after the first error; a malformed document yields nothing further.
impl<R: BufRead> Iterator for ChildWords<R> {
    type Item = Result<String>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        match self.next_word() {
            Ok(Some(word)) => Some(Ok(word)),
            Ok(None) => {
                self.done = true;
                None
            }
            Err(e) => {
                self.done = true;
                Some(Err(e))
            }
        }
    }
}
