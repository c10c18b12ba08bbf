//! Replication engine
//!
//! Walks a source folder depth-first (pre-order) and reproduces it under a
//! destination folder. Every folder creation and every file copy is saved
//! to the checkpoint before the walk moves on, so an interrupted run can be
//! restarted with the same roots and the same checkpoint without creating
//! or copying anything twice.
//!
//! Failure handling per item:
//! - listing a folder fails: the rest of that folder is abandoned
//! - creating a folder fails: that folder is not entered, siblings continue
//! - copying a file fails: see [`retry`]

pub mod retry;

use crate::remote::{ProviderError, RemoteTree};
use crate::store::{FailureLog, ProgressStore};
use crate::types::{ForkError, ItemKind, ProgressState, TreeItem};
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;
use tracing::{debug, info, warn};

pub use retry::{classify, CopyState, ErrorClass, RetryPolicy, Sleeper, ThreadSleeper};

/// Default listing page size
pub const DEFAULT_PAGE_SIZE: u32 = 100;

/// Path suffix logged when a folder cannot be listed
pub const LISTING_FAILED_MARKER: &str = "<folder_listing_failed>";

static THREAD_SLEEPER: ThreadSleeper = ThreadSleeper;

/// Category of a logged failure
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    Listing,
    CreateFolder,
    NotCopyable,
    RateLimitExhausted,
    Copy,
}

impl FailureKind {
    pub fn label(&self) -> &'static str {
        match self {
            FailureKind::Listing => "Listing failed",
            FailureKind::CreateFolder => "Folder creation failed",
            FailureKind::NotCopyable => "Not copyable",
            FailureKind::RateLimitExhausted => "Rate limit retries exhausted",
            FailureKind::Copy => "Copy failed",
        }
    }
}

/// Events emitted while replicating.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplicationEvent {
    /// A destination folder was created.
    FolderCreated { path: String, id: String },
    /// Folder was already mapped by an earlier run.
    FolderReused { path: String },
    /// A file copy succeeded.
    FileCopied { path: String },
    /// File was already copied by an earlier run.
    FileSkipped { path: String },
    /// Copy hit a rate limit; the engine will sleep `wait` and retry.
    RateLimited {
        path: String,
        attempt: u32,
        wait: Duration,
    },
    /// Failure appended to the failure log; traversal continues.
    Failure {
        path: String,
        kind: FailureKind,
        detail: String,
    },
}

/// Optional callback used to receive replication events.
pub type ReplicationCallback<'a> = dyn Fn(&ReplicationEvent) + Send + Sync + 'a;

/// Counters for one `run`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReplicationStats {
    pub folders_created: usize,
    pub folders_reused: usize,
    pub files_copied: usize,
    pub files_skipped: usize,
    pub files_not_copyable: usize,
    pub rate_limit_retries: usize,
    /// Entries appended to the failure log (all kinds)
    pub failures: usize,
}

/// Resumable folder-tree replicator
pub struct Replicator<'a> {
    remote: &'a mut dyn RemoteTree,
    store: &'a mut dyn ProgressStore,
    failures: &'a FailureLog,
    policy: RetryPolicy,
    page_size: u32,
    sleeper: &'a dyn Sleeper,
    on_event: Option<&'a ReplicationCallback<'a>>,
    cancel: Option<&'a AtomicBool>,
    stats: ReplicationStats,
}

impl<'a> Replicator<'a> {
    pub fn new(
        remote: &'a mut dyn RemoteTree,
        store: &'a mut dyn ProgressStore,
        failures: &'a FailureLog,
    ) -> Self {
        Self {
            remote,
            store,
            failures,
            policy: RetryPolicy::default(),
            page_size: DEFAULT_PAGE_SIZE,
            sleeper: &THREAD_SLEEPER,
            on_event: None,
            cancel: None,
            stats: ReplicationStats::default(),
        }
    }

    pub fn with_policy(mut self, policy: RetryPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn with_page_size(mut self, page_size: u32) -> Self {
        self.page_size = page_size.max(1);
        self
    }

    pub fn with_sleeper(mut self, sleeper: &'a dyn Sleeper) -> Self {
        self.sleeper = sleeper;
        self
    }

    pub fn on_event(mut self, callback: &'a ReplicationCallback<'a>) -> Self {
        self.on_event = Some(callback);
        self
    }

    /// Stop at the next item boundary once `flag` is set.
    pub fn with_cancel(mut self, flag: &'a AtomicBool) -> Self {
        self.cancel = Some(flag);
        self
    }

    /// Replicate `source_root` into `dest_root`, updating `state` in place.
    ///
    /// Granular failures are logged and skipped. Only invalid roots, a
    /// checkpoint that cannot be saved, or cancellation end the run early;
    /// in every case `state` (and the saved checkpoint) stays consistent.
    pub fn run(
        &mut self,
        source_root: &str,
        dest_root: &str,
        state: &mut ProgressState,
    ) -> Result<ReplicationStats, ForkError> {
        let source_root = source_root.trim();
        let dest_root = dest_root.trim();
        if source_root.is_empty() || dest_root.is_empty() {
            return Err(ForkError::InvalidArgument(
                "source and destination folder ids must not be empty".to_string(),
            ));
        }

        self.stats = ReplicationStats::default();
        info!(source = source_root, destination = dest_root, "starting replication");

        self.replicate_folder(source_root, dest_root, "", state)?;

        info!(
            folders_created = self.stats.folders_created,
            files_copied = self.stats.files_copied,
            failures = self.stats.failures,
            "replication finished"
        );
        Ok(self.stats.clone())
    }

    fn replicate_folder(
        &mut self,
        source_id: &str,
        dest_id: &str,
        path: &str,
        state: &mut ProgressState,
    ) -> Result<(), ForkError> {
        if state.map_folder(source_id, dest_id) {
            self.store.save(state)?;
        }

        let mut page_token: Option<String> = None;
        loop {
            self.check_cancelled()?;

            let page = match self
                .remote
                .list_children(source_id, page_token.as_deref(), self.page_size)
            {
                Ok(page) => page,
                Err(err) => {
                    let log_path = format!("{}/{}", path, LISTING_FAILED_MARKER);
                    self.record_failure(log_path, FailureKind::Listing, err.to_string());
                    return Ok(());
                }
            };

            for item in &page.items {
                self.check_cancelled()?;
                let item_path = join_path(path, &item.name);
                match item.kind {
                    ItemKind::Folder => self.replicate_subfolder(item, dest_id, &item_path, state)?,
                    ItemKind::File => self.copy_file(item, dest_id, &item_path, state)?,
                }
            }

            match page.next_page_token {
                Some(token) if !token.is_empty() => page_token = Some(token),
                _ => break,
            }
        }

        Ok(())
    }

    fn replicate_subfolder(
        &mut self,
        item: &TreeItem,
        dest_parent: &str,
        path: &str,
        state: &mut ProgressState,
    ) -> Result<(), ForkError> {
        let existing = state.destination_of(&item.id).map(str::to_string);
        let dest_id = match existing {
            Some(existing) => {
                debug!(path, "folder already created, reusing");
                self.stats.folders_reused += 1;
                self.emit(ReplicationEvent::FolderReused {
                    path: path.to_string(),
                });
                existing
            }
            None => match self.remote.create_folder(&item.name, dest_parent) {
                Ok(new_id) => {
                    state.map_folder(&item.id, &new_id);
                    self.store.save(state)?;
                    info!(path, id = %new_id, "created folder");
                    self.stats.folders_created += 1;
                    self.emit(ReplicationEvent::FolderCreated {
                        path: path.to_string(),
                        id: new_id.clone(),
                    });
                    new_id
                }
                Err(err) => {
                    self.record_failure(path.to_string(), FailureKind::CreateFolder, err.to_string());
                    return Ok(());
                }
            },
        };

        self.replicate_folder(&item.id, &dest_id, path, state)
    }

    fn copy_file(
        &mut self,
        item: &TreeItem,
        dest_parent: &str,
        path: &str,
        state: &mut ProgressState,
    ) -> Result<(), ForkError> {
        if state.is_copied(&item.id) {
            debug!(path, "file already copied, skipping");
            self.stats.files_skipped += 1;
            self.emit(ReplicationEvent::FileSkipped {
                path: path.to_string(),
            });
            return Ok(());
        }

        let mut copy_state = CopyState::Attempting(0);
        let mut last_error: Option<ProviderError> = None;

        while let CopyState::Attempting(attempt) = copy_state {
            let outcome = self.remote.copy_file(&item.id, dest_parent);
            let transition = self.policy.transition(attempt, outcome.as_ref().map(|_| ()));

            if let Some(wait) = transition.wait {
                warn!(path, attempt = attempt + 1, wait_secs = wait.as_secs(), "rate limited, backing off");
                self.stats.rate_limit_retries += 1;
                self.emit(ReplicationEvent::RateLimited {
                    path: path.to_string(),
                    attempt: attempt + 1,
                    wait,
                });
                self.sleeper.sleep(wait);
            }

            last_error = outcome.err();
            copy_state = transition.next;
        }

        let detail = last_error.as_ref().map(ToString::to_string).unwrap_or_default();
        match copy_state {
            CopyState::Succeeded => {
                state.mark_copied(&item.id);
                self.store.save(state)?;
                info!(path, "copied file");
                self.stats.files_copied += 1;
                self.emit(ReplicationEvent::FileCopied {
                    path: path.to_string(),
                });
            }
            CopyState::PermanentlySkipped => {
                let reason = last_error
                    .as_ref()
                    .and_then(ProviderError::reason)
                    .unwrap_or("unknown");
                self.stats.files_not_copyable += 1;
                self.record_failure(
                    path.to_string(),
                    FailureKind::NotCopyable,
                    format!("Permission error: {}", reason),
                );
            }
            CopyState::Failed => {
                let kind = match last_error.as_ref().map(classify) {
                    Some(ErrorClass::RateLimited) => FailureKind::RateLimitExhausted,
                    _ => FailureKind::Copy,
                };
                let detail = match kind {
                    FailureKind::RateLimitExhausted => format!(
                        "gave up after {} attempts: {}",
                        self.policy.max_attempts(),
                        detail
                    ),
                    _ => detail,
                };
                self.record_failure(path.to_string(), kind, detail);
            }
            CopyState::Attempting(_) => {}
        }

        Ok(())
    }

    fn record_failure(&mut self, path: String, kind: FailureKind, detail: String) {
        warn!(path = %path, kind = kind.label(), "{}", detail);
        self.failures.append(&path, &detail);
        self.stats.failures += 1;
        self.emit(ReplicationEvent::Failure { path, kind, detail });
    }

    fn check_cancelled(&self) -> Result<(), ForkError> {
        match self.cancel {
            Some(flag) if flag.load(Ordering::SeqCst) => Err(ForkError::Interrupted),
            _ => Ok(()),
        }
    }

    fn emit(&self, event: ReplicationEvent) {
        if let Some(callback) = self.on_event {
            callback(&event);
        }
    }
}

/// Replicate with the default policy, page size and thread sleeps.
pub fn replicate(
    remote: &mut dyn RemoteTree,
    store: &mut dyn ProgressStore,
    failures: &FailureLog,
    source_root: &str,
    dest_root: &str,
    state: &mut ProgressState,
) -> Result<ReplicationStats, ForkError> {
    Replicator::new(remote, store, failures).run(source_root, dest_root, state)
}

fn join_path(parent: &str, name: &str) -> String {
    if parent.is_empty() {
        name.to_string()
    } else {
        format!("{}/{}", parent, name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::remote::MemoryTree;
    use crate::store::MemoryProgressStore;
    use std::cell::RefCell;
    use std::sync::Mutex;
    use tempfile::TempDir;

    #[derive(Default)]
    struct RecordingSleeper {
        slept: RefCell<Vec<Duration>>,
    }

    impl Sleeper for RecordingSleeper {
        fn sleep(&self, duration: Duration) {
            self.slept.borrow_mut().push(duration);
        }
    }

    fn rate_limited() -> ProviderError {
        ProviderError::new("User Rate Limit Exceeded")
            .with_status(403)
            .with_reason("userRateLimitExceeded")
    }

    /// Source root "root-src": file-1, folder-1 { file-2 }
    fn scenario_tree() -> MemoryTree {
        let mut tree = MemoryTree::new();
        tree.add_file("root-src", "file-1", "f1")
            .add_folder("root-src", "folder-1", "sub")
            .add_file("folder-1", "file-2", "f2");
        tree
    }

    struct Harness {
        _dir: TempDir,
        failures: FailureLog,
        store: MemoryProgressStore,
        sleeper: RecordingSleeper,
    }

    impl Harness {
        fn new() -> Self {
            let dir = TempDir::new().expect("create tempdir");
            let failures = FailureLog::new(dir.path().join("failed_files.log"));
            Self {
                _dir: dir,
                failures,
                store: MemoryProgressStore::new(),
                sleeper: RecordingSleeper::default(),
            }
        }

        fn run(
            &mut self,
            tree: &mut MemoryTree,
            state: &mut ProgressState,
        ) -> Result<ReplicationStats, ForkError> {
            Replicator::new(tree, &mut self.store, &self.failures)
                .with_sleeper(&self.sleeper)
                .run("root-src", "root-dst", state)
        }

        fn failure_lines(&self) -> Vec<String> {
            std::fs::read_to_string(self.failures.path())
                .unwrap_or_default()
                .lines()
                .map(str::to_string)
                .collect()
        }
    }

    #[test]
    fn test_scenario_copies_tree_into_empty_state() {
        let mut harness = Harness::new();
        let mut tree = scenario_tree();
        let mut state = ProgressState::new();

        let stats = harness.run(&mut tree, &mut state).expect("replicate");

        assert_eq!(state.destination_of("root-src"), Some("root-dst"));
        assert_eq!(state.destination_of("folder-1"), Some("created-1"));
        assert_eq!(state.mapped_folder_count(), 2);
        assert!(state.is_copied("file-1"));
        assert!(state.is_copied("file-2"));
        assert_eq!(state.copied_file_count(), 2);

        assert_eq!(tree.create_calls(), 1);
        assert_eq!(tree.copy_calls(), vec!["file-1", "file-2"]);
        assert_eq!(stats.folders_created, 1);
        assert_eq!(stats.files_copied, 2);
        assert_eq!(stats.failures, 0);
        assert!(!harness.failures.has_entries());
    }

    #[test]
    fn test_files_land_in_mapped_destination_parent() {
        let mut harness = Harness::new();
        let mut tree = scenario_tree();
        let mut state = ProgressState::new();

        harness.run(&mut tree, &mut state).expect("replicate");

        let copies: Vec<_> = tree
            .calls()
            .iter()
            .filter_map(|c| match c {
                crate::remote::RemoteCall::CopyFile { file_id, parent_id } => {
                    Some((file_id.as_str(), parent_id.as_str()))
                }
                _ => None,
            })
            .collect();
        assert_eq!(copies, vec![("file-1", "root-dst"), ("file-2", "created-1")]);
        assert!(tree.calls().contains(&crate::remote::RemoteCall::CreateFolder {
            name: "sub".to_string(),
            parent_id: "root-dst".to_string(),
        }));
    }

    #[test]
    fn test_checkpoint_saved_after_every_mutation() {
        let mut harness = Harness::new();
        let mut tree = scenario_tree();
        let mut state = ProgressState::new();

        harness.run(&mut tree, &mut state).expect("replicate");

        // root mapping + one folder + two files
        assert_eq!(harness.store.save_count(), 4);
        assert_eq!(harness.store.last_saved(), Some(&state));
    }

    #[test]
    fn test_second_run_is_a_full_skip() {
        let mut harness = Harness::new();
        let mut tree = scenario_tree();
        let mut state = ProgressState::new();
        harness.run(&mut tree, &mut state).expect("first run");
        let saves_after_first = harness.store.save_count();

        tree.clear_calls();
        let mut resumed = harness.store.load().expect("load checkpoint");
        let stats = harness.run(&mut tree, &mut resumed).expect("second run");

        assert_eq!(tree.create_calls(), 0);
        assert!(tree.copy_calls().is_empty());
        assert_eq!(stats.folders_reused, 1);
        assert_eq!(stats.files_skipped, 2);
        assert_eq!(harness.store.save_count(), saves_after_first);
        assert_eq!(resumed, state);
    }

    #[test]
    fn test_pagination_visits_every_child_once() {
        let mut harness = Harness::new();
        let mut tree = MemoryTree::new().with_max_page_size(3);
        for i in 0..10 {
            tree.add_file("root-src", &format!("file-{i}"), &format!("f{i}"));
        }
        let mut state = ProgressState::new();

        let stats = harness.run(&mut tree, &mut state).expect("replicate");

        let mut copied = tree.copy_calls();
        copied.sort_unstable();
        copied.dedup();
        assert_eq!(copied.len(), 10);
        assert_eq!(tree.copy_calls().len(), 10);
        assert_eq!(stats.files_copied, 10);
        assert_eq!(tree.list_calls("root-src"), 4);
    }

    #[test]
    fn test_rate_limit_backoff_increases_and_stops_at_cap() {
        let mut harness = Harness::new();
        let mut tree = MemoryTree::new();
        tree.add_file("root-src", "file-1", "f1");
        tree.fail_copy("file-1", [rate_limited(), rate_limited(), rate_limited()]);
        let mut state = ProgressState::new();

        let stats = harness.run(&mut tree, &mut state).expect("replicate");

        assert_eq!(tree.copy_calls().len(), 3);
        assert_eq!(
            *harness.sleeper.slept.borrow(),
            vec![Duration::from_secs(2), Duration::from_secs(3)]
        );
        assert!(!state.is_copied("file-1"));
        assert_eq!(stats.rate_limit_retries, 2);
        assert_eq!(stats.failures, 1);

        let lines = harness.failure_lines();
        assert_eq!(lines.len(), 1);
        assert!(lines[0].contains("Path: f1"));
        assert!(lines[0].contains("gave up after 3 attempts"));
    }

    #[test]
    fn test_rate_limit_then_success_copies_once() {
        let mut harness = Harness::new();
        let mut tree = MemoryTree::new();
        tree.add_file("root-src", "file-1", "f1");
        tree.fail_copy("file-1", [rate_limited()]);
        let mut state = ProgressState::new();

        let stats = harness.run(&mut tree, &mut state).expect("replicate");

        assert_eq!(tree.copy_calls().len(), 2);
        assert!(state.is_copied("file-1"));
        assert_eq!(stats.files_copied, 1);
        assert_eq!(stats.failures, 0);
        assert_eq!(*harness.sleeper.slept.borrow(), vec![Duration::from_secs(2)]);
    }

    #[test]
    fn test_not_copyable_is_never_retried() {
        let mut harness = Harness::new();
        let mut tree = MemoryTree::new();
        tree.add_file("root-src", "file-1", "locked.pdf");
        tree.fail_copy(
            "file-1",
            [ProviderError::new("cannot copy")
                .with_status(403)
                .with_reason("cannotCopyFile")],
        );
        let mut state = ProgressState::new();

        let stats = harness.run(&mut tree, &mut state).expect("replicate");

        assert_eq!(tree.copy_calls().len(), 1);
        assert!(harness.sleeper.slept.borrow().is_empty());
        assert_eq!(stats.files_not_copyable, 1);
        assert!(!state.is_copied("file-1"));

        let lines = harness.failure_lines();
        assert_eq!(lines.len(), 1);
        assert!(lines[0].contains("Path: locked.pdf | Error: Permission error: cannotCopyFile"));
    }

    #[test]
    fn test_other_copy_error_is_not_retried() {
        let mut harness = Harness::new();
        let mut tree = MemoryTree::new();
        tree.add_file("root-src", "file-1", "f1")
            .add_file("root-src", "file-2", "f2");
        tree.fail_copy("file-1", [ProviderError::new("backend error").with_status(500)]);
        let mut state = ProgressState::new();

        let stats = harness.run(&mut tree, &mut state).expect("replicate");

        assert_eq!(tree.copy_calls(), vec!["file-1", "file-2"]);
        assert!(!state.is_copied("file-1"));
        assert!(state.is_copied("file-2"));
        assert_eq!(stats.failures, 1);
    }

    #[test]
    fn test_folder_create_failure_skips_subtree_only() {
        let mut harness = Harness::new();
        let mut tree = MemoryTree::new();
        tree.add_folder("root-src", "folder-a", "a")
            .add_file("folder-a", "file-a", "fa")
            .add_folder("root-src", "folder-b", "b")
            .add_file("folder-b", "file-b", "fb");
        tree.fail_create("a", ProviderError::new("forbidden").with_status(403));
        let mut state = ProgressState::new();

        let stats = harness.run(&mut tree, &mut state).expect("replicate");

        assert_eq!(tree.list_calls("folder-a"), 0);
        assert!(!state.is_folder_mapped("folder-a"));
        assert!(state.is_copied("file-b"));
        assert!(!state.is_copied("file-a"));
        assert_eq!(stats.folders_created, 1);
        assert_eq!(harness.failure_lines().len(), 1);
        assert!(harness.failure_lines()[0].contains("Path: a |"));
    }

    #[test]
    fn test_listing_failure_aborts_only_that_subtree() {
        let mut harness = Harness::new();
        let mut tree = MemoryTree::new();
        tree.add_folder("root-src", "folder-a", "a")
            .add_file("folder-a", "file-a", "fa")
            .add_file("root-src", "file-1", "f1");
        tree.fail_listing("folder-a", ProviderError::new("not found").with_status(404));
        let mut state = ProgressState::new();

        let stats = harness.run(&mut tree, &mut state).expect("replicate");

        assert!(state.is_folder_mapped("folder-a"));
        assert!(!state.is_copied("file-a"));
        assert!(state.is_copied("file-1"));
        assert_eq!(stats.failures, 1);
        assert!(harness.failure_lines()[0].contains("Path: a/<folder_listing_failed>"));
    }

    #[test]
    fn test_pre_order_finishes_subtree_before_next_sibling() {
        let mut harness = Harness::new();
        let mut tree = MemoryTree::new();
        tree.add_folder("root-src", "folder-a", "a")
            .add_file("folder-a", "file-a", "fa")
            .add_file("root-src", "file-1", "f1");
        let mut state = ProgressState::new();

        harness.run(&mut tree, &mut state).expect("replicate");

        assert_eq!(tree.copy_calls(), vec!["file-a", "file-1"]);
    }

    #[test]
    fn test_empty_roots_fail_fast() {
        let mut harness = Harness::new();
        let mut tree = scenario_tree();
        let mut state = ProgressState::new();

        let err = Replicator::new(&mut tree, &mut harness.store, &harness.failures)
            .run("  ", "root-dst", &mut state)
            .unwrap_err();

        assert!(matches!(err, ForkError::InvalidArgument(_)));
        assert!(tree.calls().is_empty());
        assert!(state.is_empty());
    }

    #[test]
    fn test_cancel_flag_stops_with_interrupted() {
        let mut harness = Harness::new();
        let mut tree = scenario_tree();
        let mut state = ProgressState::new();
        let cancel = AtomicBool::new(true);

        let err = Replicator::new(&mut tree, &mut harness.store, &harness.failures)
            .with_cancel(&cancel)
            .run("root-src", "root-dst", &mut state)
            .unwrap_err();

        assert!(matches!(err, ForkError::Interrupted));
        assert!(tree.copy_calls().is_empty());
        // Root mapping is still persisted before the first check.
        assert_eq!(harness.store.save_count(), 1);
    }

    #[test]
    fn test_events_follow_traversal_order() {
        let mut harness = Harness::new();
        let mut tree = scenario_tree();
        let mut state = ProgressState::new();
        let events: Mutex<Vec<ReplicationEvent>> = Mutex::new(Vec::new());
        let callback = |event: &ReplicationEvent| {
            if let Ok(mut guard) = events.lock() {
                guard.push(event.clone());
            }
        };

        Replicator::new(&mut tree, &mut harness.store, &harness.failures)
            .on_event(&callback)
            .run("root-src", "root-dst", &mut state)
            .expect("replicate");

        let events = events.into_inner().expect("events");
        assert_eq!(
            events,
            vec![
                ReplicationEvent::FileCopied {
                    path: "f1".to_string()
                },
                ReplicationEvent::FolderCreated {
                    path: "sub".to_string(),
                    id: "created-1".to_string()
                },
                ReplicationEvent::FileCopied {
                    path: "sub/f2".to_string()
                },
            ]
        );
    }

    #[test]
    fn test_join_path() {
        assert_eq!(join_path("", "a"), "a");
        assert_eq!(join_path("a/b", "c"), "a/b/c");
    }
}
