//! Key-driven state machine behind the interactive view.
//!
//! The navigator owns a snapshot of every fetched record plus the filtered,
//! sorted sequence the cursor indexes into. Gateway calls are awaited inline,
//! so a refresh or delete holds up input until it completes.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::api::{DnsApiClient, DnsManager, RecordListing, SkippedZone};
use crate::records::{sort_records, DnsRecord, SortKey};

#[derive(Debug, Clone, PartialEq)]
pub enum View {
    List,
    /// Instructions for the `add` subcommand.
    Add,
    /// Instructions for the `update` subcommand, showing the selected record.
    Edit { record: DnsRecord },
    /// Waiting for confirmation to delete `target`.
    Delete { target: DnsRecord },
    /// Editing the keyword filter.
    Filter { input: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Status {
    Info(String),
    Error(String),
}

pub struct Navigator<C> {
    manager: DnsManager<C>,
    records: Vec<DnsRecord>,
    filtered: Vec<DnsRecord>,
    cursor: usize,
    view: View,
    sort_key: SortKey,
    ascending: bool,
    keyword: String,
    page_size: usize,
    status: Option<Status>,
    should_quit: bool,
}

impl<C: DnsApiClient> Navigator<C> {
    pub fn new(manager: DnsManager<C>, listing: RecordListing, page_size: usize) -> Self {
        let mut navigator = Self {
            manager,
            records: Vec::new(),
            filtered: Vec::new(),
            cursor: 0,
            view: View::List,
            sort_key: SortKey::default(),
            ascending: true,
            keyword: String::new(),
            page_size: page_size.max(1),
            status: None,
            should_quit: false,
        };
        let skipped = navigator.install(listing);
        navigator.status = skipped_warning(&skipped).map(Status::Error);
        navigator
    }

    pub async fn handle_key(&mut self, key: KeyEvent) {
        if key.kind != KeyEventKind::Press {
            return;
        }

        match self.view {
            View::List => self.handle_list_key(key).await,
            View::Add | View::Edit { .. } => {
                if key.code == KeyCode::Esc {
                    self.view = View::List;
                }
            }
            View::Delete { .. } => self.handle_delete_key(key).await,
            View::Filter { .. } => self.handle_filter_key(key),
        }
    }

    async fn handle_list_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.should_quit = true;
            }
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Up | KeyCode::Char('k') => {
                self.cursor = self.cursor.saturating_sub(1);
            }
            KeyCode::Down | KeyCode::Char('j') => {
                if self.cursor + 1 < self.filtered.len() {
                    self.cursor += 1;
                }
            }
            KeyCode::Char('a') => self.view = View::Add,
            KeyCode::Char('e') => {
                if let Some(record) = self.selected().cloned() {
                    self.view = View::Edit { record };
                }
            }
            KeyCode::Char('d') => {
                if let Some(target) = self.selected().cloned() {
                    self.view = View::Delete { target };
                }
            }
            KeyCode::Char('f') => {
                self.view = View::Filter {
                    input: self.keyword.clone(),
                };
            }
            KeyCode::Char('s') => {
                self.ascending = !self.ascending;
                self.apply_filter_and_sort();
            }
            KeyCode::Char('r') => {
                self.status = Some(match self.reload().await {
                    Ok(skipped) => match skipped_warning(&skipped) {
                        Some(warning) => Status::Error(warning),
                        None => Status::Info(format!("Loaded {} records", self.records.len())),
                    },
                    Err(message) => Status::Error(format!("Refresh failed: {}", message)),
                });
            }
            _ => {}
        }
    }

    async fn handle_delete_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc => self.view = View::List,
            KeyCode::Char('y') => {
                let View::Delete { target } = std::mem::replace(&mut self.view, View::List) else {
                    return;
                };
                let label = format!("{} {} ({})", target.record_type, target.name, target.zone_name);

                self.status = Some(
                    match self.manager.delete_record(&target.id, &target.zone_id).await {
                        Ok(()) => match self.reload().await {
                            Ok(_) => Status::Info(format!("Deleted {}", label)),
                            Err(message) => Status::Error(format!(
                                "Deleted {}, but refresh failed: {}",
                                label, message
                            )),
                        },
                        Err(e) => Status::Error(format!("Delete failed: {}", e)),
                    },
                );
            }
            _ => {}
        }
    }

    fn handle_filter_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc => self.view = View::List,
            KeyCode::Enter => {
                if let View::Filter { input } = std::mem::replace(&mut self.view, View::List) {
                    self.keyword = input.trim().to_string();
                    self.apply_filter_and_sort();
                }
            }
            KeyCode::Backspace => {
                if let View::Filter { input } = &mut self.view {
                    input.pop();
                }
            }
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                if let View::Filter { input } = &mut self.view {
                    input.push(c);
                }
            }
            _ => {}
        }
    }

    /// Replaces the snapshot with a fresh fetch. The old snapshot is kept when
    /// the fetch fails.
    async fn reload(&mut self) -> Result<Vec<SkippedZone>, String> {
        let listing = self
            .manager
            .list_all_records()
            .await
            .map_err(|e| e.to_string())?;
        Ok(self.install(listing))
    }

    fn install(&mut self, listing: RecordListing) -> Vec<SkippedZone> {
        self.records = listing.records;
        self.apply_filter_and_sort();
        listing.skipped
    }

    fn apply_filter_and_sort(&mut self) {
        let keyword = &self.keyword;
        self.filtered = self
            .records
            .iter()
            .filter(|record| record.matches_keyword(keyword))
            .cloned()
            .collect();
        sort_records(&mut self.filtered, self.sort_key, self.ascending);
        self.cursor = self.cursor.min(self.filtered.len().saturating_sub(1));
    }

    pub fn selected(&self) -> Option<&DnsRecord> {
        self.filtered.get(self.cursor)
    }
}

impl<C> Navigator<C> {
    pub fn view(&self) -> &View {
        &self.view
    }

    pub fn records(&self) -> &[DnsRecord] {
        &self.records
    }

    pub fn filtered(&self) -> &[DnsRecord] {
        &self.filtered
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn sort_key(&self) -> SortKey {
        self.sort_key
    }

    pub fn ascending(&self) -> bool {
        self.ascending
    }

    pub fn keyword(&self) -> &str {
        &self.keyword
    }

    pub fn status(&self) -> Option<&Status> {
        self.status.as_ref()
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// The page holding the cursor.
    pub fn page(&self) -> usize {
        self.cursor / self.page_size
    }

    pub fn page_count(&self) -> usize {
        self.filtered.len().div_ceil(self.page_size).max(1)
    }

    /// Index of the first visible record and the records on the current page.
    pub fn page_records(&self) -> (usize, &[DnsRecord]) {
        let start = (self.page() * self.page_size).min(self.filtered.len());
        let end = (start + self.page_size).min(self.filtered.len());
        (start, &self.filtered[start..end])
    }
}

fn skipped_warning(skipped: &[SkippedZone]) -> Option<String> {
    if skipped.is_empty() {
        return None;
    }
    let zones: Vec<&str> = skipped.iter().map(|z| z.zone_name.as_str()).collect();
    Some(format!("Skipped zones: {}", zones.join(", ")))
}
