//! Scripted stand-ins for the bw CLI and the terminal

use anyhow::{bail, Result};
use keyring_core::{CommandRunner, Prompter, RunOutput};
use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

/// Replays canned outputs in order and records every argv it was given
#[derive(Clone, Default)]
pub struct ScriptedRunner {
    outputs: Rc<RefCell<VecDeque<RunOutput>>>,
    calls: Rc<RefCell<Vec<Vec<String>>>>,
}

impl ScriptedRunner {
    pub fn new(outputs: impl IntoIterator<Item = RunOutput>) -> Self {
        Self {
            outputs: Rc::new(RefCell::new(outputs.into_iter().collect())),
            calls: Rc::default(),
        }
    }

    pub fn calls(&self) -> Vec<Vec<String>> {
        self.calls.borrow().clone()
    }

    pub fn last_call(&self) -> Option<Vec<String>> {
        self.calls.borrow().last().cloned()
    }
}

impl CommandRunner for ScriptedRunner {
    fn run(&self, argv: &[String]) -> Result<RunOutput> {
        self.calls.borrow_mut().push(argv.to_vec());
        match self.outputs.borrow_mut().pop_front() {
            Some(output) => Ok(output),
            None => bail!("unexpected command: {:?}", argv),
        }
    }
}

/// Answers prompts from a queue and records everything shown
#[derive(Clone, Default)]
pub struct ScriptedPrompter {
    answers: Rc<RefCell<VecDeque<String>>>,
    shown: Rc<RefCell<Vec<String>>>,
}

impl ScriptedPrompter {
    pub fn new(answers: &[&str]) -> Self {
        Self {
            answers: Rc::new(RefCell::new(
                answers.iter().map(|a| a.to_string()).collect(),
            )),
            shown: Rc::default(),
        }
    }

    pub fn shown(&self) -> Vec<String> {
        self.shown.borrow().clone()
    }

    fn answer(&self) -> Result<String> {
        match self.answers.borrow_mut().pop_front() {
            Some(answer) => Ok(answer),
            None => bail!("unexpected prompt"),
        }
    }
}

impl Prompter for ScriptedPrompter {
    fn notify(&self, message: &str) {
        self.shown.borrow_mut().push(message.to_string());
    }

    fn choose(&self, header: &str, options: &[String]) -> Result<String> {
        let mut shown = self.shown.borrow_mut();
        shown.push(header.to_string());
        shown.extend(options.iter().cloned());
        drop(shown);
        self.answer()
    }

    fn confirm(&self, message: &str) -> Result<bool> {
        self.shown.borrow_mut().push(message.to_string());
        Ok(self.answer()?.eq_ignore_ascii_case("yes"))
    }
}

pub fn argv(args: &[&str]) -> Vec<String> {
    args.iter().map(|s| s.to_string()).collect()
}
