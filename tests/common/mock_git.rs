//! Scripted git executor for testing
//!
//! `MockGit` answers each git command from a script and records the exact
//! argument lists it was given, so tests can assert on the order of
//! mutations without touching a real repository.

#![allow(dead_code)]

use async_trait::async_trait;
use gsync::error::{Error, Result};
use gsync::git::GitExecutor;
use gsync::types::CommandOutput;
use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;

/// Scripted `GitExecutor`
///
/// Responses are keyed by the space-joined argument list. Several
/// responses queued for the same command are returned in order, and the
/// last one repeats, so a query whose answer changes mid-operation (like
/// the `MERGE_HEAD` check) can be scripted as a sequence.
///
/// Unscripted commands fail with exit code 128, like git does for
/// unknown revisions. A `None` response means git could not be started.
pub struct MockGit {
    responses: Mutex<HashMap<String, VecDeque<Option<CommandOutput>>>>,
    calls: Mutex<Vec<String>>,
}

impl Default for MockGit {
    fn default() -> Self {
        Self::new()
    }
}

impl MockGit {
    /// Create an empty mock
    pub fn new() -> Self {
        Self {
            responses: Mutex::new(HashMap::new()),
            calls: Mutex::new(Vec::new()),
        }
    }

    fn push(&self, args: &str, response: Option<CommandOutput>) -> &Self {
        self.responses
            .lock()
            .unwrap()
            .entry(args.to_string())
            .or_default()
            .push_back(response);
        self
    }

    /// Queue a response for `args`
    pub fn on(&self, args: &str, output: CommandOutput) -> &Self {
        self.push(args, Some(output))
    }

    /// Queue a failure to spawn git for `args`
    pub fn spawn_error(&self, args: &str) -> &Self {
        self.push(args, None)
    }

    /// Queue a successful response with `stdout`
    pub fn ok(&self, args: &str, stdout: &str) -> &Self {
        self.on(args, CommandOutput::success(stdout))
    }

    /// Queue a failing response
    pub fn fail(&self, args: &str, exit_code: i32, stderr: &str) -> &Self {
        self.on(args, CommandOutput::failure(exit_code, stderr))
    }

    /// Queue a failing response that also wrote to stdout (like `git merge`)
    pub fn fail_with_stdout(&self, args: &str, exit_code: i32, stdout: &str) -> &Self {
        self.on(
            args,
            CommandOutput {
                stdout: stdout.to_string(),
                stderr: String::new(),
                exit_code: Some(exit_code),
                succeeded: false,
            },
        )
    }

    // === Common repository state ===

    /// Inside a work tree on `branch` with no merge in progress and a clean tree
    pub fn repo_on_branch(&self, branch: &str) -> &Self {
        self.ok("rev-parse --is-inside-work-tree", "true\n")
            .ok("branch --show-current", &format!("{branch}\n"))
            .ok("status --porcelain", "")
    }

    /// Script the `MERGE_HEAD` check as a sequence (true = merge in progress)
    pub fn merge_head_sequence(&self, states: &[bool]) -> &Self {
        for &in_progress in states {
            if in_progress {
                self.ok("rev-parse --verify --quiet MERGE_HEAD", "1234abcd\n");
            } else {
                self.fail("rev-parse --verify --quiet MERGE_HEAD", 1, "");
            }
        }
        self
    }

    /// `name` resolves to commit `oid`
    pub fn commit(&self, name: &str, oid: &str) -> &Self {
        self.ok(
            &format!("rev-parse --verify --quiet {name}^{{commit}}"),
            &format!("{oid}\n"),
        )
    }

    /// `name` does not resolve
    pub fn missing(&self, name: &str) -> &Self {
        self.fail(&format!("rev-parse --verify --quiet {name}^{{commit}}"), 1, "")
    }

    /// `git rev-list --count exclude..include` prints `count`
    pub fn count(&self, exclude: &str, include: &str, count: usize) -> &Self {
        self.ok(
            &format!("rev-list --count {exclude}..{include}"),
            &format!("{count}\n"),
        )
    }

    /// `git for-each-ref` lists these local branches
    pub fn local_branches(&self, names: &[&str]) -> &Self {
        let listing: String = names
            .iter()
            .map(|n| format!("refs/heads/{n}\t\n"))
            .collect();
        self.ok(
            "for-each-ref --format=%(refname)%09%(symref) refs/heads refs/remotes",
            &listing,
        )
    }

    // === Call tracking ===

    /// Every command run so far, in order
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    /// Whether `args` was run
    pub fn called(&self, args: &str) -> bool {
        self.calls.lock().unwrap().iter().any(|c| c == args)
    }

    /// How many times `args` was run
    pub fn call_count(&self, args: &str) -> usize {
        self.calls.lock().unwrap().iter().filter(|c| *c == args).count()
    }

    /// Index of the first run of `args`
    pub fn position(&self, args: &str) -> Option<usize> {
        self.calls.lock().unwrap().iter().position(|c| c == args)
    }

    /// Index of the last run of `args`
    pub fn last_position(&self, args: &str) -> Option<usize> {
        self.calls.lock().unwrap().iter().rposition(|c| c == args)
    }

    /// Whether any mutating command ran
    pub fn mutated(&self) -> bool {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .any(|c| c.starts_with("merge ") || c.starts_with("checkout "))
    }
}

#[async_trait]
impl GitExecutor for MockGit {
    async fn execute(&self, args: &[&str]) -> Result<CommandOutput> {
        let key = args.join(" ");
        self.calls.lock().unwrap().push(key.clone());

        let mut responses = self.responses.lock().unwrap();
        let response = match responses.get_mut(&key) {
            Some(queue) if queue.len() > 1 => queue.pop_front().unwrap(),
            Some(queue) if !queue.is_empty() => queue[0].clone(),
            _ => Some(CommandOutput::failure(
                128,
                format!("fatal: unscripted command: git {key}"),
            )),
        };
        response.ok_or_else(|| {
            Error::Io(std::io::Error::other(format!("could not spawn git {key}")))
        })
    }
}
