//! A full questionnaire driven through a piped source, with a timeout.

use std::io::{self, BufReader, Read};
use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use ti_core::PromptConfig;
use ti_prompt::{PromptError, Prompter};
use ti_reader::BoundedLineReader;

/// Bytes arriving from another thread, like a terminal fed by a person.
struct Pipe {
    chunks: mpsc::Receiver<Vec<u8>>,
    pending: Vec<u8>,
}

impl Read for Pipe {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        if self.pending.is_empty() {
            match self.chunks.recv() {
                Ok(chunk) => self.pending = chunk,
                Err(mpsc::RecvError) => return Ok(0),
            }
        }
        let n = buf.len().min(self.pending.len());
        buf[..n].copy_from_slice(&self.pending[..n]);
        self.pending.drain(..n);
        Ok(n)
    }
}

#[test]
fn test_questionnaire_with_timeout() {
    let (tx, rx) = mpsc::channel::<Vec<u8>>();
    let pipe = BufReader::new(Pipe {
        chunks: rx,
        pending: Vec::new(),
    });
    let config = PromptConfig::default().with_timeout_ms(Some(300));
    let mut prompter = Prompter::new(BoundedLineReader::new(pipe), Vec::new(), config);

    let typist = thread::spawn(move || {
        for answer in ["Ada\n", "\n", "thirty\n", "36\n", "2\n", "y\n"] {
            thread::sleep(Duration::from_millis(10));
            let _ = tx.send(answer.as_bytes().to_vec());
        }
        // Keep the pipe open so the last prompt has to time out.
        thread::sleep(Duration::from_millis(600));
    });

    assert_eq!(prompter.ask("Name:").expect("name"), "Ada");
    assert_eq!(
        prompter.ask_or_default("Language:", "Rust").expect("language"),
        "Rust"
    );
    assert_eq!(prompter.ask_parsed::<u32>("Age:").expect("age"), 36);
    let editor = prompter
        .select("Editor:", &["vim", "emacs", "nano"])
        .expect("editor");
    assert_eq!(editor.index, 1);
    assert_eq!(editor.label, "emacs");
    assert!(prompter.confirm("Submit?", Some(false)).expect("confirm"));

    match prompter.ask("Anything else?") {
        Err(PromptError::TimedOut { after }) => assert_eq!(after, Duration::from_millis(300)),
        other => panic!("Expected TimedOut, got {other:?}"),
    }

    let transcript = String::from_utf8(prompter.into_output()).expect("utf-8");
    assert!(transcript.contains("Invalid value 'thirty'"));
    assert!(transcript.contains("  2) emacs"));
    assert!(transcript.ends_with("Anything else? "));

    typist.join().expect("typist");
}

#[test]
fn test_closed_pipe_ends_the_session() {
    let (tx, rx) = mpsc::channel::<Vec<u8>>();
    drop(tx);
    let pipe = BufReader::new(Pipe {
        chunks: rx,
        pending: Vec::new(),
    });
    let mut prompter = Prompter::new(
        BoundedLineReader::new(pipe),
        Vec::new(),
        PromptConfig::default(),
    );

    assert!(matches!(
        prompter.confirm("Still there?", Some(true)),
        Err(PromptError::EndOfInput)
    ));
}
