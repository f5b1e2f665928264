use anyhow::Result;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use inkpost_config::Config;
use inkpost_engine::{
    ContentNode, PageRequest, Post, PostFilter, PostStore, SortBy, SortOrder, content, io,
};
use ratatui::{
    Frame, Terminal,
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
};
use std::{env, io::stdout, path::PathBuf, process};
use uuid::Uuid;

struct App {
    posts: Vec<Post>,
    post_list_state: ListState,
    current_content: Vec<Line<'static>>,
}

impl App {
    fn new(content_path: PathBuf) -> Result<Self> {
        let store = io::load_store(&content_path, Uuid::new_v4())?;

        // Published posts only, alphabetical, one big page for the list pane
        let filter = PostFilter {
            sort_by: SortBy::Title,
            sort_order: SortOrder::Asc,
            ..Default::default()
        };
        let request = PageRequest {
            page: 1,
            page_size: 500,
        };
        let posts = store.list(&filter, request, None).items;

        let mut app = Self {
            posts,
            post_list_state: ListState::default(),
            current_content: Vec::new(),
        };

        // Select first post if available
        if !app.posts.is_empty() {
            app.post_list_state.select(Some(0));
            app.update_content_for_selection();
        }

        Ok(app)
    }

    fn next_post(&mut self) {
        if self.posts.is_empty() {
            return;
        }
        let i = match self.post_list_state.selected() {
            Some(i) => (i + 1) % self.posts.len(),
            None => 0,
        };
        self.post_list_state.select(Some(i));
        self.update_content_for_selection();
    }

    fn previous_post(&mut self) {
        if self.posts.is_empty() {
            return;
        }
        let i = match self.post_list_state.selected() {
            Some(i) => {
                if i == 0 {
                    self.posts.len() - 1
                } else {
                    i - 1
                }
            }
            None => 0,
        };
        self.post_list_state.select(Some(i));
        self.update_content_for_selection();
    }

    fn update_content_for_selection(&mut self) {
        if let Some(index) = self.post_list_state.selected()
            && let Some(post) = self.posts.get(index)
        {
            self.current_content = render_post_content(post);
        }
    }
}

/// Turns a post into styled terminal lines by walking the parsed node tree.
fn render_post_content(post: &Post) -> Vec<Line<'static>> {
    let mut lines = vec![
        Line::from(Span::styled(
            post.title.clone(),
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
    ];

    for node in content::render(&post.body) {
        match node {
            ContentNode::Paragraph(children) => {
                let mut spans = Vec::new();
                push_spans(&children, Style::default(), &mut spans);
                lines.push(Line::from(spans));
                lines.push(Line::from("")); // Blank line between paragraphs
            }
            // render() only emits paragraphs at the top level, but stay
            // exhaustive so a new node kind cannot be dropped silently.
            other => {
                let mut spans = Vec::new();
                push_spans(std::slice::from_ref(&other), Style::default(), &mut spans);
                lines.push(Line::from(spans));
            }
        }
    }

    lines
}

fn push_spans(nodes: &[ContentNode], style: Style, spans: &mut Vec<Span<'static>>) {
    for node in nodes {
        match node {
            ContentNode::Text(text) => spans.push(Span::styled(text.clone(), style)),
            ContentNode::Bold(children) => {
                push_spans(children, style.add_modifier(Modifier::BOLD), spans)
            }
            ContentNode::Underline(children) => {
                push_spans(children, style.add_modifier(Modifier::UNDERLINED), spans)
            }
            ContentNode::Italic(children) => {
                push_spans(children, style.add_modifier(Modifier::ITALIC), spans)
            }
            ContentNode::Image { url } => spans.push(Span::styled(
                format!("[image: {url}]"),
                style.add_modifier(Modifier::DIM),
            )),
            ContentNode::Paragraph(children) => push_spans(children, style, spans),
        }
    }
}

fn main() -> Result<()> {
    // Determine content path from CLI args or config file
    let args: Vec<String> = env::args().collect();
    let config_path = Config::config_path();

    let content_path;
    let from_config;

    if args.len() == 2 {
        // CLI argument provided - use it
        content_path = PathBuf::from(&args[1]);
        from_config = false;
    } else if args.len() == 1 {
        // No CLI argument - try config file
        match Config::load() {
            Ok(Some(config)) => {
                content_path = config.content_path;
                from_config = true;
            }
            Ok(None) => {
                eprintln!("Error: No content path provided and no config file found");
                eprintln!("Usage: {} <content-folder-path>", args[0]);
                eprintln!("Or create a config file at {}", config_path.display());
                process::exit(1);
            }
            Err(e) => {
                eprintln!("Error: Failed to load config file: {e}");
                eprintln!("Usage: {} <content-folder-path>", args[0]);
                process::exit(1);
            }
        }
    } else {
        eprintln!("Usage: {} [content-folder-path]", args[0]);
        process::exit(1);
    };

    // Validate content directory using engine
    if let Err(e) = io::validate_content_dir(&content_path) {
        let source = if from_config {
            format!(" from config file '{}'", config_path.display())
        } else {
            String::new()
        };
        eprintln!(
            "Error: Content path '{}'{} is invalid: {e}",
            content_path.display(),
            source
        );
        process::exit(1);
    }

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Create app
    let mut app = App::new(content_path)?;

    // Main loop
    let res = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        println!("{err:?}");
    }

    Ok(())
}

fn run_app<B: ratatui::backend::Backend>(terminal: &mut Terminal<B>, app: &mut App) -> Result<()>
where
    // Backend errors cross the anyhow boundary in `?`.
    B::Error: Send + Sync + 'static,
{
    loop {
        terminal.draw(|f| ui(f, app))?;

        if let Event::Key(key) = event::read()? {
            match key.code {
                KeyCode::Char('q') => return Ok(()),
                KeyCode::Down | KeyCode::Char('j') => app.next_post(),
                KeyCode::Up | KeyCode::Char('k') => app.previous_post(),
                _ => {}
            }
        }
    }
}

fn ui(f: &mut Frame, app: &mut App) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .margin(1)
        .constraints([Constraint::Percentage(30), Constraint::Percentage(70)].as_ref())
        .split(f.area());

    // Post list panel
    let post_items: Vec<ListItem> = app
        .posts
        .iter()
        .map(|post| ListItem::new(vec![Line::from(vec![Span::raw(post.title.clone())])]))
        .collect();

    let posts_list = List::new(post_items)
        .block(Block::default().borders(Borders::ALL).title("Posts"))
        .highlight_style(Style::default().bg(Color::Yellow).fg(Color::Black));

    f.render_stateful_widget(posts_list, chunks[0], &mut app.post_list_state);

    // Content panel
    let content_text = if app.current_content.is_empty() {
        vec![Line::from("No published posts in this content directory")]
    } else {
        app.current_content.clone()
    };

    let content = Paragraph::new(content_text)
        .block(Block::default().borders(Borders::ALL).title("Content"))
        .wrap(ratatui::widgets::Wrap { trim: true });

    f.render_widget(content, chunks[1]);

    // Instructions
    let help_text = Line::from(vec![
        Span::raw("q: Quit | "),
        Span::raw("↑/k: Previous | "),
        Span::raw("↓/j: Next"),
    ]);

    let help = Paragraph::new(vec![help_text]).block(Block::default());

    // Place help at bottom
    let bottom_chunk = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(3)].as_ref())
        .split(f.area());

    f.render_widget(help, bottom_chunk[1]);
}
