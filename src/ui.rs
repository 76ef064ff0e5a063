//! TUI module using ratatui.
//!
//! The event loop owns the [`Dashboard`]; fetches run on tokio tasks and
//! report back over a channel tagged with their [`RefreshTicket`].

use crate::agent::{AgentError, NewsProvider};
use crate::category::Category;
use crate::dashboard::{Dashboard, RefreshTicket, View};
use crate::markup::{is_bullet, segments, Segment};
use crate::news::NewsResponse;
use chrono::Datelike;
use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, List, ListItem, Paragraph, Tabs, Wrap};
use ratatui::{DefaultTerminal, Frame};
use std::io;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

/// How long to wait for a key before checking for fetch results
const TICK: Duration = Duration::from_millis(100);

const TITLE: &str = "EducaFoco: Portal do Magistério";

type FetchOutcome = (RefreshTicket, Result<NewsResponse, AgentError>);

/// Run the dashboard until the user quits. Starts one fetch immediately.
pub async fn run(provider: Arc<dyn NewsProvider>) -> io::Result<()> {
    let mut terminal = ratatui::init();
    let result = App::new(provider).run(&mut terminal).await;
    ratatui::restore();
    result
}

struct App {
    dashboard: Dashboard,
    provider: Arc<dyn NewsProvider>,
    tx: UnboundedSender<FetchOutcome>,
    rx: UnboundedReceiver<FetchOutcome>,
    scroll: u16,
    quit: bool,
}

impl App {
    fn new(provider: Arc<dyn NewsProvider>) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self {
            dashboard: Dashboard::new(),
            provider,
            tx,
            rx,
            scroll: 0,
            quit: false,
        }
    }

    async fn run(mut self, terminal: &mut DefaultTerminal) -> io::Result<()> {
        self.refresh();

        while !self.quit {
            terminal.draw(|frame| self.draw(frame))?;

            if event::poll(TICK)? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.handle_key(key.code);
                    }
                }
            }

            while let Ok((ticket, outcome)) = self.rx.try_recv() {
                if self.dashboard.complete(ticket, outcome) {
                    self.scroll = 0;
                }
            }
            tokio::task::yield_now().await;
        }
        Ok(())
    }

    /// Spawn a fetch unless one is already running.
    fn refresh(&mut self) {
        let Some(ticket) = self.dashboard.begin_refresh() else {
            return;
        };
        tracing::info!(
            generation = ticket.generation(),
            provider = self.provider.name(),
            "refresh requested"
        );
        let provider = Arc::clone(&self.provider);
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let outcome = provider.fetch_news().await;
            // The receiver only goes away when the app is quitting.
            let _ = tx.send((ticket, outcome));
        });
    }

    fn handle_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Char('q') | KeyCode::Esc => self.quit = true,
            KeyCode::Char('r') => self.refresh(),
            KeyCode::Right | KeyCode::Tab | KeyCode::Char('l') => {
                self.dashboard.next_tab();
                self.scroll = 0;
            }
            KeyCode::Left | KeyCode::BackTab | KeyCode::Char('h') => {
                self.dashboard.previous_tab();
                self.scroll = 0;
            }
            KeyCode::Char('0') => {
                self.dashboard.select(Category::Geral);
                self.scroll = 0;
            }
            KeyCode::Char(c @ '1'..='9') => {
                self.dashboard.select_index(c as usize - '1' as usize);
                self.scroll = 0;
            }
            KeyCode::Down | KeyCode::Char('j') => self.scroll = self.scroll.saturating_add(1),
            KeyCode::Up | KeyCode::Char('k') => self.scroll = self.scroll.saturating_sub(1),
            _ => {}
        }
    }

    fn draw(&self, frame: &mut Frame) {
        let [header, tabs, body, footer] = Layout::vertical([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Min(5),
            Constraint::Length(1),
        ])
        .areas(frame.area());
        let [main, side] =
            Layout::horizontal([Constraint::Percentage(65), Constraint::Percentage(35)])
                .areas(body);

        self.draw_header(frame, header);
        self.draw_tabs(frame, tabs);
        self.draw_content(frame, main);
        self.draw_sources(frame, side);
        self.draw_footer(frame, footer);
    }

    fn draw_header(&self, frame: &mut Frame, area: Rect) {
        let year = chrono::Local::now().year();
        let line = Line::from(vec![
            Span::styled(
                TITLE,
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw("  "),
            Span::styled(
                format!("Versão {} / {}", year, year + 1),
                Style::default().fg(Color::LightBlue),
            ),
        ]);
        let header = Paragraph::new(line)
            .alignment(Alignment::Center)
            .block(Block::bordered().border_style(Style::default().fg(Color::Blue)));
        frame.render_widget(header, area);
    }

    fn draw_tabs(&self, frame: &mut Frame, area: Rect) {
        let titles = Category::TABS
            .iter()
            .enumerate()
            .map(|(i, cat)| format!("{} {} {}", i + 1, cat.icon(), cat.label()));
        let tabs = Tabs::new(titles)
            .select(self.dashboard.active_index())
            .highlight_style(
                Style::default()
                    .fg(Color::White)
                    .bg(Color::Blue)
                    .add_modifier(Modifier::BOLD),
            )
            .block(Block::bordered());
        frame.render_widget(tabs, area);
    }

    fn draw_content(&self, frame: &mut Frame, area: Rect) {
        let active = self.dashboard.active();
        let block = Block::bordered().title(format!(" {} {} ", active.icon(), active.label()));

        let lines: Vec<Line> = match self.dashboard.view() {
            View::Idle => vec![
                Line::default(),
                Line::styled(
                    "Pressione r para sincronizar.",
                    Style::default().fg(Color::Blue),
                ),
            ],
            View::Loading => vec![
                Line::default(),
                Line::styled("Sincronizando...", Style::default().fg(Color::Yellow)),
            ],
            View::Failed(message) => vec![
                Line::default(),
                Line::styled(
                    "⚠️  Sincronização Interrompida",
                    Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
                ),
                Line::raw(message),
                Line::default(),
                Line::styled(
                    "Pressione r para recarregar agora.",
                    Style::default().fg(Color::Blue),
                ),
            ],
            View::Empty => vec![
                Line::default(),
                Line::styled(
                    "🔎 Sem atualizações no radar",
                    Style::default().add_modifier(Modifier::BOLD),
                ),
                Line::styled(
                    "Nenhuma notícia crítica para esta categoria foi detectada nas últimas 24h.",
                    Style::default().fg(Color::Gray),
                ),
                Line::default(),
                Line::styled(
                    "Pressione r para forçar nova busca.",
                    Style::default().fg(Color::Blue),
                ),
            ],
            View::Lines(lines) => lines.iter().map(|l| news_line(l)).collect(),
        };

        let centered = !matches!(self.dashboard.view(), View::Lines(_));
        let paragraph = Paragraph::new(lines)
            .block(block)
            .wrap(Wrap { trim: false })
            .scroll((self.scroll, 0))
            .alignment(if centered {
                Alignment::Center
            } else {
                Alignment::Left
            });
        frame.render_widget(paragraph, area);
    }

    fn draw_sources(&self, frame: &mut Frame, area: Rect) {
        let block = Block::bordered().title(" Links da Matéria ");
        let sources = self.dashboard.sources();

        if sources.is_empty() {
            let waiting = Paragraph::new("Aguardando fontes...")
                .style(Style::default().fg(Color::DarkGray))
                .alignment(Alignment::Center)
                .block(block);
            frame.render_widget(waiting, area);
            return;
        }

        let items: Vec<ListItem> = sources
            .iter()
            .map(|source| {
                let host = source
                    .host()
                    .or_else(|| source.uri.clone())
                    .unwrap_or_default();
                ListItem::new(vec![
                    Line::styled(
                        source.display_title().to_string(),
                        Style::default().add_modifier(Modifier::BOLD),
                    ),
                    Line::styled(host, Style::default().fg(Color::DarkGray)),
                ])
            })
            .collect();
        frame.render_widget(List::new(items).block(block), area);
    }

    fn draw_footer(&self, frame: &mut Frame, area: Rect) {
        let mut spans = vec![Span::styled(
            "r atualizar · ←/→ abas · 1-5 · 0 geral · ↑/↓ rolar · q sair",
            Style::default().fg(Color::DarkGray),
        )];
        if let Some(time) = self.dashboard.last_update() {
            if !self.dashboard.is_loading() {
                spans.push(Span::raw("   "));
                spans.push(Span::styled(
                    format!("Último check: {}", time),
                    Style::default().fg(Color::LightBlue),
                ));
            }
        }
        frame.render_widget(Paragraph::new(Line::from(spans)), area);
    }
}

/// Render one news line: bullet marker plus highlighted bold segments.
fn news_line(text: &str) -> Line<'_> {
    let mut spans = Vec::new();
    if is_bullet(text) {
        spans.push(Span::styled("● ", Style::default().fg(Color::Blue)));
    }
    spans.extend(segments(text).into_iter().map(|segment| match segment {
        Segment::Plain(s) => Span::raw(s),
        Segment::Bold(s) => Span::styled(
            s,
            Style::default()
                .fg(Color::LightYellow)
                .add_modifier(Modifier::BOLD),
        ),
    }));
    Line::from(spans)
}
