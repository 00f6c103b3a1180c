use std::collections::HashSet;
use std::fs::File;
use std::io::BufReader;
use std::io::{self, stdout};
use std::path::{Path, PathBuf};

use anyhow::Context;
use banpick::{
    Advisor, Character, CounterEntry, CounterTable, DraftSession, Phase, Role, Roster, Side, Tier,
};
use clap::Parser;
use ratatui::{
    crossterm::{
        event::{self, Event, KeyCode, KeyEventKind},
        terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
        ExecutableCommand,
    },
    prelude::*,
    widgets::*,
};

#[derive(Parser)]
struct Args {
    /// Path to the roster JSON snapshot
    #[arg(long, default_value = "data/roster.json")]
    roster: PathBuf,

    /// Path to the counter table JSON snapshot
    #[arg(long, default_value = "data/counters.json")]
    counters: PathBuf,

    /// Path to the owned-characters JSON snapshot (a list of names).
    /// Without it the owned-only filter is disabled.
    #[arg(long)]
    owned: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    // Load every snapshot before any draft state exists.
    let mut app = App::load(&args)?;

    enable_raw_mode()?;
    stdout().execute(EnterAlternateScreen)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout()))?;

    let result = run(&mut terminal, &mut app);

    disable_raw_mode()?;
    stdout().execute(LeaveAlternateScreen)?;
    result.map_err(Into::into)
}

fn run(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, app: &mut App) -> io::Result<()> {
    while !app.should_quit {
        terminal.draw(|frame| app.ui(frame))?;
        app.handle_events()?;
    }
    Ok(())
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> anyhow::Result<T> {
    let file = File::open(path).with_context(|| format!("Cannot open '{}'", path.display()))?;
    serde_json::from_reader(BufReader::new(file))
        .with_context(|| format!("Cannot parse '{}'", path.display()))
}

/// One line of the pool list, scored during ally pick turns.
#[derive(Clone)]
struct PoolRow {
    name: String,
    role: Role,
    tier: Option<Tier>,
    score: Option<f64>,
}

struct App {
    roster: Roster,
    counters: CounterTable,
    owned: HashSet<String>,
    /// Whether an owned list was supplied at all; without one the
    /// owned-only toggle stays off.
    has_owned_list: bool,
    session: DraftSession,
    cursor: usize,
    searching: bool,
    status: String,
    should_quit: bool,
}

impl App {
    fn load(args: &Args) -> anyhow::Result<Self> {
        let characters: Vec<Character> = read_json(&args.roster)?;
        let counter_entries: Vec<CounterEntry> = read_json(&args.counters)?;
        let owned_names: Vec<String> = match &args.owned {
            Some(path) => read_json(path)?,
            None => Vec::new(),
        };
        Ok(Self {
            roster: Roster::new(characters),
            counters: CounterTable::new(counter_entries),
            owned: owned_names.into_iter().collect(),
            has_owned_list: args.owned.is_some(),
            session: DraftSession::new(),
            cursor: 0,
            searching: false,
            status: String::new(),
            should_quit: false,
        })
    }

    /// The filtered pool in display order: recommendation order with scores
    /// during an ally pick turn, roster order otherwise.
    fn pool_rows(&self) -> Vec<PoolRow> {
        let pool = self.session.available_pool(&self.roster, &self.owned);
        let rows: Vec<PoolRow> = pool
            .iter()
            .map(|c| PoolRow {
                name: c.name.clone(),
                role: c.role,
                tier: c.tier,
                score: None,
            })
            .collect();

        let ally_is_picking = self.session.phase() == Phase::Pick
            && self.session.current_side() == Some(Side::Ally);
        if !ally_is_picking {
            return rows;
        }

        let names: Vec<String> = rows.iter().map(|row| row.name.clone()).collect();
        let advisor = Advisor::with_tier_bonus(&self.counters, &self.roster);
        advisor
            .recommend(self.session.picks(Side::Enemy), &names)
            .into_iter()
            .filter_map(|rec| {
                rows.iter().find(|row| row.name == rec.name).map(|row| PoolRow {
                    score: Some(rec.score),
                    ..row.clone()
                })
            })
            .collect()
    }

    fn handle_events(&mut self) -> io::Result<()> {
        if !event::poll(std::time::Duration::from_millis(16))? {
            return Ok(());
        }
        let Event::Key(key) = event::read()? else {
            return Ok(());
        };
        if key.kind != KeyEventKind::Press {
            return Ok(());
        }

        if self.searching {
            match key.code {
                KeyCode::Esc | KeyCode::Enter => self.searching = false,
                KeyCode::Backspace => {
                    let mut search = self.session.filters().search.clone();
                    search.pop();
                    self.session.set_search(search);
                }
                KeyCode::Char(c) => {
                    let mut search = self.session.filters().search.clone();
                    search.push(c);
                    self.session.set_search(search);
                }
                _ => {}
            }
            return Ok(());
        }

        self.status.clear();
        match key.code {
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Char('/') => self.searching = true,
            KeyCode::Char('c') => self.cycle_role_filter(),
            KeyCode::Char('o') => {
                if self.has_owned_list {
                    let owned_only = !self.session.filters().owned_only;
                    self.session.set_owned_only(owned_only);
                } else {
                    self.status = String::from("No owned-characters list was loaded");
                }
            }
            KeyCode::Char('u') => {
                if !self.session.undo() {
                    self.status = String::from("Nothing to undo");
                }
            }
            KeyCode::Char('r') => self.session.reset(),
            KeyCode::Char('a') if self.session.phase() == Phase::AskFirstPick => {
                self.commit_first_pick(Side::Ally);
            }
            KeyCode::Char('e') if self.session.phase() == Phase::AskFirstPick => {
                self.commit_first_pick(Side::Enemy);
            }
            KeyCode::Up => self.cursor = self.cursor.saturating_sub(1),
            KeyCode::Down => self.cursor += 1,
            KeyCode::Enter => self.select_under_cursor(),
            _ => {}
        }
        Ok(())
    }

    fn cycle_role_filter(&mut self) {
        let next = match self.session.filters().role {
            None => Some(Role::ALL[0]),
            Some(role) => Role::ALL
                .iter()
                .position(|r| *r == role)
                .and_then(|i| Role::ALL.get(i + 1))
                .copied(),
        };
        self.session.set_role_filter(next);
    }

    fn commit_first_pick(&mut self, side: Side) {
        if let Err(err) = self.session.commit_first_pick(side) {
            self.status = err.to_string();
        }
    }

    fn select_under_cursor(&mut self) {
        let rows = self.pool_rows();
        if rows.is_empty() {
            return;
        }
        let row = &rows[self.cursor.min(rows.len() - 1)];
        let name = row.name.clone();
        if self.session.phase() == Phase::AskFirstPick {
            self.status = String::from("Choose the first picker: [a]lly or [e]nemy");
            return;
        }
        if let Err(err) = self.session.select(&name) {
            self.status = err.to_string();
        }
    }

    fn ui(&self, frame: &mut Frame) {
        let main_layout = Layout::new(
            Direction::Vertical,
            [
                Constraint::Length(3),
                Constraint::Min(0),
                Constraint::Length(3),
            ],
        )
        .split(frame.size());
        let columns = Layout::new(
            Direction::Horizontal,
            [
                Constraint::Length(26),
                Constraint::Min(0),
                Constraint::Length(26),
            ],
        )
        .split(main_layout[1]);

        frame.render_widget(self.header(), main_layout[0]);
        frame.render_widget(self.side_column(Side::Ally), columns[0]);
        self.render_pool(frame, columns[1]);
        frame.render_widget(self.side_column(Side::Enemy), columns[2]);
        frame.render_widget(self.footer(), main_layout[2]);
    }

    fn header(&self) -> Paragraph<'_> {
        let headline = match (self.session.phase(), self.session.current_side()) {
            (Phase::AllyBans, _) => "Ban phase: ally bans".to_string(),
            (Phase::EnemyBans, _) => "Ban phase: enemy bans".to_string(),
            (Phase::AskFirstPick, _) => "Who has the first pick?".to_string(),
            (Phase::Pick, Some(side)) => format!("Pick phase: {} to act", side),
            (Phase::Pick, None) | (Phase::Complete, _) => "Draft complete".to_string(),
        };
        let filters = self.session.filters();
        let role = filters
            .role
            .map_or("All".to_string(), |role| role.to_string());
        let line = Line::from(vec![
            Span::styled(headline, Style::new().add_modifier(Modifier::BOLD)),
            Span::raw(format!(
                "   role: {}   search: '{}'   owned only: {}",
                role,
                filters.search,
                if filters.owned_only { "on" } else { "off" },
            )),
        ]);
        Paragraph::new(line).block(Block::bordered().title("banpick"))
    }

    fn side_column(&self, side: Side) -> Paragraph<'_> {
        let mut lines = vec![Line::from(Span::styled(
            "Bans",
            Style::new().add_modifier(Modifier::UNDERLINED),
        ))];
        for name in self.session.bans(side) {
            lines.push(Line::from(format!("  {}", name)));
        }
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            "Picks",
            Style::new().add_modifier(Modifier::UNDERLINED),
        )));
        for name in self.session.picks(side) {
            lines.push(Line::from(format!("  {}", name)));
        }
        let title = match side {
            Side::Ally => "Ally",
            Side::Enemy => "Enemy",
        };
        let style = if self.session.current_side() == Some(side) {
            Style::new().fg(Color::Yellow)
        } else {
            Style::new()
        };
        Paragraph::new(lines).block(Block::bordered().title(title).border_style(style))
    }

    fn render_pool(&self, frame: &mut Frame, area: Rect) {
        let rows = self.pool_rows();
        let items: Vec<ListItem> = rows
            .iter()
            .map(|row| {
                let tier = row
                    .tier
                    .map_or(String::from(" "), |tier| tier.to_string());
                let score = row
                    .score
                    .map_or(String::new(), |score| format!("{:6.1}", score));
                ListItem::new(format!(
                    "{:<20} {:<11} {} {}",
                    row.name, row.role, tier, score
                ))
            })
            .collect();
        let list = List::new(items)
            .block(Block::bordered().title("Available"))
            .highlight_symbol(">> ")
            .highlight_style(Style::new().add_modifier(Modifier::REVERSED));
        let mut state = ListState::default();
        if !rows.is_empty() {
            state.select(Some(self.cursor.min(rows.len() - 1)));
        }
        frame.render_stateful_widget(list, area, &mut state);
    }

    fn footer(&self) -> Paragraph<'_> {
        let text = if self.searching {
            format!("search: {}▏  (Enter or Esc to finish)", self.session.filters().search)
        } else if !self.status.is_empty() {
            self.status.clone()
        } else if self.session.phase() == Phase::AskFirstPick {
            String::from("[a] ally picks first   [e] enemy picks first   [u]ndo   [r]eset   [q]uit")
        } else {
            String::from(
                "↑/↓ move   Enter select   / search   [c] role   [o] owned   [u]ndo   [r]eset   [q]uit",
            )
        };
        Paragraph::new(text).block(Block::bordered())
    }
}
