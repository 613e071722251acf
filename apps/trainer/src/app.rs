//! The interactive trainer.
//!
//! Owns the session for the scope being studied and wires it to the
//! persistence store (write-through after every decision), the speech
//! adapter and the terminal. All state mutation happens synchronously in
//! the input loop; speech is the only background activity and never feeds
//! back into the session.

use crate::speech::Speaker;
use crate::store::ProgressStore;
use crate::ui;
use anyhow::Result;
use std::collections::BTreeMap;
use std::io::{self, BufRead, Write};
use vocab_core::{
    card_view, completion_view, stats_view, Decision, Dictionary, DictionaryEntry, Outcome, Scope,
    Session,
};

pub struct App<S: ProgressStore> {
    dict: Dictionary,
    store: S,
    speaker: Speaker,
}

enum MenuChoice {
    Scope(Scope),
    GlobalReview,
    Quit,
}

enum SessionExit {
    ToMenu,
    Quit,
}

impl<S: ProgressStore> App<S> {
    pub fn new(dict: Dictionary, store: S) -> Self {
        Self {
            dict,
            store,
            speaker: Speaker::new(),
        }
    }

    /// Load a scope's persisted pools and start a session over it.
    fn enter_scope(&self, scope: Scope) -> Session {
        let mut loaded = BTreeMap::new();
        for level in self.dict.scope_levels(&scope) {
            let pools = self.store.load(&level);
            loaded.insert(level, pools);
        }
        tracing::info!(?scope, "entering scope");
        Session::begin(scope, &self.dict, loaded)
    }

    /// Record a decision and write the affected level's pools through
    /// before anything else happens.
    fn decide(&mut self, session: &mut Session, word: &str, outcome: Outcome) -> Result<Decision> {
        let decision = session.decide(word, outcome)?;
        let pools = session
            .pools(&decision.level)
            .expect("decided level is in scope")
            .clone();
        self.store.save(&decision.level, &pools)?;
        Ok(decision)
    }

    /// Clear a scope's persisted pools and re-enter it. The global scope
    /// clears every level.
    fn reset(&mut self, scope: Scope) -> Result<Session> {
        for level in self.dict.scope_levels(&scope) {
            self.store.clear(&level)?;
        }
        tracing::info!(?scope, "progress reset");
        Ok(self.enter_scope(scope))
    }

    pub fn run(&mut self) -> Result<()> {
        let stdin = io::stdin();
        let mut input = stdin.lock();
        loop {
            match self.level_menu(&mut input)? {
                MenuChoice::Scope(scope) => {
                    let session = self.enter_scope(scope);
                    if let SessionExit::Quit = self.run_session(session, &mut input)? {
                        return Ok(());
                    }
                }
                MenuChoice::GlobalReview => {
                    let mut session = self.enter_scope(Scope::Global);
                    if !session.start_review(&mut rand::thread_rng()) {
                        println!("No unknown words to review yet.");
                        continue;
                    }
                    if let SessionExit::Quit = self.run_session(session, &mut input)? {
                        return Ok(());
                    }
                }
                MenuChoice::Quit => return Ok(()),
            }
        }
    }

    fn level_menu(&self, input: &mut impl BufRead) -> Result<MenuChoice> {
        println!("\nChoose a level:");
        for (i, level) in self.dict.levels().iter().enumerate() {
            println!("  [{}] {}", i + 1, level.name());
        }
        println!("  [g] review unknown words across all levels");
        println!("  [q] quit");
        loop {
            let line = prompt(input)?;
            match line.as_str() {
                "g" => return Ok(MenuChoice::GlobalReview),
                "q" => return Ok(MenuChoice::Quit),
                other => {
                    let picked = other
                        .parse::<usize>()
                        .ok()
                        .and_then(|n| n.checked_sub(1))
                        .and_then(|i| self.dict.levels().get(i));
                    if let Some(level) = picked {
                        return Ok(MenuChoice::Scope(Scope::Level(level.id().to_string())));
                    }
                    println!("Unrecognized choice '{other}'");
                }
            }
        }
    }

    fn run_session(&mut self, mut session: Session, input: &mut impl BufRead) -> Result<SessionExit> {
        loop {
            if session.is_complete() {
                let view = completion_view(session.unknown_count());
                println!("\n{}", ui::format_completion(&view));
                if view.offer_review {
                    println!("[r] review  [m] menu");
                    if prompt(input)? == "r" {
                        session.start_review(&mut rand::thread_rng());
                        continue;
                    }
                }
                return Ok(SessionExit::ToMenu);
            }

            let card = session.current().expect("session is not complete").clone();
            let entry = self.dict.entry(&card.level, &card.word);
            let view = card_view(&card.word, entry, session.progress());
            println!("\n{}", ui::format_card(&view));
            println!("[k] known  [u] unknown  [s] speak  [t] stats  [e] settings  [m] menu  [q] quit");

            match prompt(input)?.as_str() {
                "k" => {
                    self.decide(&mut session, &card.word, Outcome::Known)?;
                }
                "u" => {
                    self.decide(&mut session, &card.word, Outcome::Unknown)?;
                }
                "s" => self.speaker.speak(&card.word),
                "t" => self.print_stats(&session),
                "e" => {
                    println!("[c] change level  [x] reset progress  [b] back");
                    match prompt(input)?.as_str() {
                        "c" => return Ok(SessionExit::ToMenu),
                        "x" => session = self.reset(session.scope().clone())?,
                        _ => {}
                    }
                }
                "m" => return Ok(SessionExit::ToMenu),
                "q" => return Ok(SessionExit::Quit),
                "" => {}
                other => println!("Unrecognized input '{other}'"),
            }
        }
    }

    fn print_stats(&self, session: &Session) {
        let unknown = session.unknown_cards();
        let rows: Vec<(&str, Option<&DictionaryEntry>)> = unknown
            .iter()
            .map(|c| (c.word.as_str(), self.dict.entry(&c.level, &c.word)))
            .collect();
        let view = stats_view(session.known_count(), &rows);
        println!("\n{}", ui::format_stats(&view));
    }
}

fn prompt(input: &mut impl BufRead) -> Result<String> {
    print!("> ");
    io::stdout().flush()?;
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        // EOF behaves like quitting.
        return Ok("q".to_string());
    }
    Ok(line.trim().to_lowercase())
}
