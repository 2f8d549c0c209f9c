use anyhow::Result;
use chrono::Local;
use crossterm::event::KeyCode;
use ratatui::widgets::ListState;
use report_builder_engine::{
    Block, BlockId, BlockKind, BlockType, Cmd, FieldPath, LoadOutcome, Session, io,
};
use std::path::{Path, PathBuf};
use strum::IntoEnumIterator;

/// Inline editor for the selected field
pub struct Input {
    pub field: FieldPath,
    pub buffer: String,
}

/// Status-line prompt for opening a project mid-session
#[derive(Debug, PartialEq)]
pub enum Prompt {
    OpenPath(String),
    /// The file parsed; waiting for y/n before it replaces the current blocks
    ConfirmLoad { path: PathBuf },
}

pub struct App {
    pub session: Session,
    output_dir: PathBuf,
    pub block_list_state: ListState,
    pub field_index: usize,
    pub input: Option<Input>,
    pub prompt: Option<Prompt>,
    pub status: String,
}

impl App {
    pub fn new(theme: &str, output_dir: PathBuf) -> Self {
        Self {
            session: Session::new(theme),
            output_dir,
            block_list_state: ListState::default(),
            field_index: 0,
            input: None,
            prompt: None,
            status: String::from("Press 1-9 to add a block"),
        }
    }

    /// Load a project at startup, when there is nothing to discard
    pub fn open_project(&mut self, path: &Path) -> Result<()> {
        self.load_from(path, |_| true).map(|_| ())
    }

    fn load_from(&mut self, path: &Path, confirm: impl FnOnce(&str) -> bool) -> Result<LoadOutcome> {
        let text = io::read_file(path)?;
        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();
        let outcome = self.session.load_project(&file_name, &text, confirm)?;
        if let LoadOutcome::Loaded { blocks, .. } = &outcome {
            self.status = format!("Loaded {blocks} blocks from {}", path.display());
            self.select(if self.session.report().is_empty() {
                None
            } else {
                Some(0)
            });
        }
        Ok(outcome)
    }

    /// Try a load, turning the confirmation question into a y/n prompt
    fn request_open(&mut self, path: PathBuf) {
        let mut question = None;
        let result = self.load_from(&path, |q| {
            question = Some(q.to_string());
            false
        });
        match (result, question) {
            (Ok(LoadOutcome::Cancelled), Some(question)) => {
                let question: Vec<&str> = question.lines().filter(|l| !l.is_empty()).collect();
                self.status = format!("{} (y/n)", question.join(" "));
                self.prompt = Some(Prompt::ConfirmLoad { path });
            }
            (Ok(_), _) => {}
            (Err(e), _) => self.status = format!("Could not open {}: {e}", path.display()),
        }
    }

    pub fn selected_block(&self) -> Option<&Block> {
        let index = self.block_list_state.selected()?;
        self.session.report().blocks().get(index)
    }

    fn selected_id(&self) -> Option<BlockId> {
        self.selected_block().map(Block::id)
    }

    pub fn selected_fields(&self) -> Vec<FieldPath> {
        self.selected_block()
            .map(Block::editable_fields)
            .unwrap_or_default()
    }

    pub fn selected_field(&self) -> Option<FieldPath> {
        self.selected_fields().get(self.field_index).copied()
    }

    fn select(&mut self, index: Option<usize>) {
        self.block_list_state.select(index);
        self.field_index = 0;
    }

    /// Handle one key press; returns `false` when the app should quit
    pub fn on_key(&mut self, code: KeyCode) -> bool {
        if self.input.is_some() {
            self.on_input_key(code);
            return true;
        }
        if self.prompt.is_some() {
            self.on_prompt_key(code);
            return true;
        }

        match code {
            KeyCode::Char('q') => return false,
            KeyCode::Down | KeyCode::Char('j') => self.next_block(),
            KeyCode::Up | KeyCode::Char('k') => self.previous_block(),
            KeyCode::Char('J') => self.move_selected(1),
            KeyCode::Char('K') => self.move_selected(-1),
            KeyCode::Char(c @ '1'..='9') => {
                let n = c as usize - '1' as usize;
                if let Some(block_type) = BlockType::iter().nth(n) {
                    self.add_block(block_type);
                }
            }
            KeyCode::Char('d') => self.delete_selected(),
            KeyCode::Tab => self.next_field(),
            KeyCode::Enter => self.start_editing(),
            KeyCode::Char('+') => self.run_on_selected(|id| Cmd::AddTableRow { id }),
            KeyCode::Char('-') => self.run_on_selected(|id| Cmd::RemoveTableRow { id }),
            KeyCode::Char('<') => self.shift_columns(-1),
            KeyCode::Char('>') => self.shift_columns(1),
            KeyCode::Char('t') => self.cycle_ref_type(),
            KeyCode::Char('y') => self.toggle_ai_used(),
            KeyCode::Char('s') => self.save(),
            KeyCode::Char('e') => self.export(),
            KeyCode::Char('o') => {
                self.prompt = Some(Prompt::OpenPath(String::new()));
                self.status = "Type a project path, Enter to open, Esc to cancel".to_string();
            }
            _ => {}
        }
        true
    }

    fn on_prompt_key(&mut self, code: KeyCode) {
        match (self.prompt.take(), code) {
            (Some(Prompt::OpenPath(mut buffer)), KeyCode::Char(c)) => {
                buffer.push(c);
                self.prompt = Some(Prompt::OpenPath(buffer));
            }
            (Some(Prompt::OpenPath(mut buffer)), KeyCode::Backspace) => {
                buffer.pop();
                self.prompt = Some(Prompt::OpenPath(buffer));
            }
            (Some(Prompt::OpenPath(buffer)), KeyCode::Enter) => {
                self.request_open(PathBuf::from(buffer.trim()));
            }
            (Some(Prompt::ConfirmLoad { path }), KeyCode::Char('y')) => {
                if let Err(e) = self.load_from(&path, |_| true) {
                    self.status = format!("Could not open {}: {e}", path.display());
                }
            }
            (Some(Prompt::OpenPath(_) | Prompt::ConfirmLoad { .. }), KeyCode::Esc)
            | (Some(Prompt::ConfirmLoad { .. }), KeyCode::Char('n')) => {
                self.status = "Load cancelled".to_string();
            }
            (prompt, _) => self.prompt = prompt,
        }
    }

    fn on_input_key(&mut self, code: KeyCode) {
        let Some(input) = self.input.as_mut() else {
            return;
        };
        match code {
            KeyCode::Char(c) => input.buffer.push(c),
            KeyCode::Backspace => {
                input.buffer.pop();
            }
            KeyCode::Esc => {
                self.input = None;
                self.status = "Edit cancelled".to_string();
            }
            KeyCode::Enter => self.commit_input(),
            _ => {}
        }
    }

    fn next_block(&mut self) {
        let len = self.session.report().len();
        if len == 0 {
            return;
        }
        let i = match self.block_list_state.selected() {
            Some(i) => (i + 1) % len,
            None => 0,
        };
        self.select(Some(i));
    }

    fn previous_block(&mut self) {
        let len = self.session.report().len();
        if len == 0 {
            return;
        }
        let i = match self.block_list_state.selected() {
            Some(0) | None => len - 1,
            Some(i) => i - 1,
        };
        self.select(Some(i));
    }

    fn move_selected(&mut self, offset: isize) {
        let Some(from) = self.block_list_state.selected() else {
            return;
        };
        let Some(to) = from.checked_add_signed(offset) else {
            return;
        };
        if to >= self.session.report().len() {
            return;
        }
        match self.session.apply(Cmd::MoveBlock { from, to }) {
            Ok(_) => self.block_list_state.select(Some(to)),
            Err(e) => self.status = e.to_string(),
        }
    }

    fn add_block(&mut self, block_type: BlockType) {
        if let Err(e) = self.session.apply(Cmd::AddBlock { block_type }) {
            self.status = e.to_string();
            return;
        }
        let last = self.session.report().len().saturating_sub(1);
        self.select(Some(last));
        self.status = format!("Added {}", block_type.label());
    }

    fn delete_selected(&mut self) {
        let (Some(index), Some(id)) = (self.block_list_state.selected(), self.selected_id()) else {
            return;
        };
        if let Err(e) = self.session.apply(Cmd::DeleteBlock { id }) {
            self.status = e.to_string();
            return;
        }
        let len = self.session.report().len();
        self.select(if len == 0 { None } else { Some(index.min(len - 1)) });
        self.status = "Block deleted".to_string();
    }

    fn next_field(&mut self) {
        let count = self.selected_fields().len();
        if count > 0 {
            self.field_index = (self.field_index + 1) % count;
        }
    }

    fn start_editing(&mut self) {
        let Some(field) = self.selected_field() else {
            return;
        };
        let is_image_source = matches!(
            (self.selected_block().map(Block::kind), field),
            (Some(BlockKind::Image { .. }), FieldPath::Content)
        );
        let buffer = if is_image_source {
            String::new()
        } else {
            self.selected_block()
                .and_then(|block| block.field_value(&field))
                .unwrap_or_default()
                .to_string()
        };
        self.input = Some(Input { field, buffer });
        self.status = if is_image_source {
            "Type an image path, Enter to load, Esc to cancel".to_string()
        } else {
            format!("Editing {}: Enter to save, Esc to cancel", field.label())
        };
    }

    fn commit_input(&mut self) {
        let (Some(input), Some(block)) = (self.input.take(), self.selected_block()) else {
            return;
        };
        let id = block.id();
        let value = if matches!(block.kind(), BlockKind::Image { .. })
            && input.field == FieldPath::Content
        {
            match io::read_image_data_url(Path::new(input.buffer.trim())) {
                Ok(url) => url,
                Err(e) => {
                    self.status = format!("Could not load image: {e}");
                    return;
                }
            }
        } else {
            input.buffer
        };

        match self.session.apply(Cmd::SetField {
            id,
            field: input.field,
            value,
        }) {
            Ok(_) => self.status = format!("{} updated", input.field.label()),
            Err(e) => self.status = e.to_string(),
        }
    }

    fn run_on_selected(&mut self, cmd: impl FnOnce(BlockId) -> Cmd) {
        let Some(id) = self.selected_id() else {
            return;
        };
        if let Err(e) = self.session.apply(cmd(id)) {
            self.status = e.to_string();
        }
        self.clamp_field_index();
    }

    fn shift_columns(&mut self, delta: isize) {
        let Some(table) = self.selected_block().and_then(Block::table) else {
            return;
        };
        let columns = table.columns().saturating_add_signed(delta);
        self.run_on_selected(|id| Cmd::SetTableColumns { id, columns });
    }

    fn cycle_ref_type(&mut self) {
        let Some(BlockKind::Ref { ref_type, .. }) = self.selected_block().map(Block::kind) else {
            return;
        };
        let ref_type = ref_type.next();
        self.status = format!("Reference type: {}", ref_type.label());
        self.run_on_selected(|id| Cmd::SetRefType { id, ref_type });
    }

    fn toggle_ai_used(&mut self) {
        let Some(BlockKind::Ai { used, .. }) = self.selected_block().map(Block::kind) else {
            return;
        };
        let used = used.toggled();
        self.run_on_selected(|id| Cmd::SetAiUsed { id, used });
    }

    fn clamp_field_index(&mut self) {
        let count = self.selected_fields().len();
        if self.field_index >= count {
            self.field_index = count.saturating_sub(1);
        }
    }

    fn save(&mut self) {
        let result = self.session.save_project(Local::now()).map_err(anyhow::Error::from).and_then(
            |saved| {
                let path = self.output_dir.join(&saved.file_name);
                io::write_file(&path, &saved.json)?;
                Ok(path)
            },
        );
        self.status = match result {
            Ok(path) => format!("Project saved to {}", path.display()),
            Err(e) => format!("Save failed: {e}"),
        };
    }

    fn export(&mut self) {
        let exported = self.session.export_text();
        let path = self.output_dir.join(&exported.file_name);
        self.status = match io::write_file(&path, &exported.text) {
            Ok(()) => format!("Exported to {}", path.display()),
            Err(e) => format!("Export failed: {e}"),
        };
    }
}
