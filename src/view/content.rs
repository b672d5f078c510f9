//! Main content area rendering (browse carousels, search grid, detail, saved grid)

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Padding, Paragraph, Wrap},
    Frame,
};

use crate::model::{
    ActiveSection, ContentState, ContentView, FavoriteRecord, Feed, FeedKind, FeedStatus,
    HomeState, ImageUrls, MovieDetail, MovieSummary, SearchMode, SearchState, UiState,
    GRID_COLUMNS,
};
use super::utils::{
    border_style, rating_stars, release_year_label, render_movie_card, render_movie_grid,
    scroll_offset, CARD_HEIGHT, CARD_WIDTH,
};

/// Read-only inputs shared by the content renderers
pub struct ContentContext<'a> {
    pub ui_state: &'a UiState,
    pub content_state: &'a ContentState,
    pub home_state: &'a HomeState,
    pub favorites: &'a [FavoriteRecord],
    pub favorites_ready: bool,
    pub image_urls: &'a ImageUrls,
}

impl ContentContext<'_> {
    fn is_favorite(&self, movie_id: u64) -> bool {
        self.favorites.iter().any(|record| record.id() == movie_id)
    }
}

pub fn render_main_content(frame: &mut Frame, area: Rect, ctx: &ContentContext) {
    let is_focused = ctx.ui_state.active_section == ActiveSection::MainContent;

    if ctx.content_state.is_loading {
        render_message(frame, area, " Movie ", "Loading...", Color::Yellow, is_focused);
        return;
    }

    match &ctx.content_state.view {
        ContentView::Home => render_home(frame, area, ctx, is_focused),
        ContentView::Saved { selected_index } => {
            render_saved(frame, area, ctx, *selected_index, is_focused)
        }
        ContentView::MovieDetail { detail, is_favorite } => {
            render_movie_detail(frame, area, detail, *is_favorite, ctx.image_urls)
        }
        ContentView::LoadingDetail { .. } => {
            render_message(frame, area, " Movie ", "Loading...", Color::Yellow, is_focused)
        }
        ContentView::DetailUnavailable { .. } => render_message(
            frame,
            area,
            " Movie ",
            "Could not load movie details.\n\nPress Esc to go back",
            Color::Red,
            is_focused,
        ),
    }
}

fn render_message(
    frame: &mut Frame,
    area: Rect,
    title: &str,
    text: &str,
    color: Color,
    focused: bool,
) {
    let message = Paragraph::new(text.to_string())
        .style(Style::default().fg(color))
        .wrap(Wrap { trim: false })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(title.to_string())
                .padding(Padding::horizontal(1))
                .border_style(border_style(focused)),
        );
    frame.render_widget(message, area);
}

fn render_home(frame: &mut Frame, area: Rect, ctx: &ContentContext, is_focused: bool) {
    let home = ctx.home_state;

    if home.search.is_searching() {
        render_search_grid(frame, area, ctx, &home.search, home.grid_index, is_focused);
        return;
    }

    if home.is_browse_loading() {
        render_message(frame, area, " Discover ", "Loading...", Color::Yellow, is_focused);
        return;
    }

    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Discover ")
        .border_style(border_style(is_focused));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(CARD_HEIGHT + 2),
            Constraint::Length(CARD_HEIGHT + 2),
            Constraint::Length(CARD_HEIGHT + 2),
            Constraint::Min(0),
        ])
        .split(inner);

    for kind in FeedKind::ALL {
        let selected = home.selected_feed == kind.index();
        render_carousel(
            frame,
            rows[kind.index()],
            kind,
            home.feed(kind),
            selected && is_focused,
            |id| ctx.is_favorite(id),
        );
    }
}

fn render_carousel(
    frame: &mut Frame,
    area: Rect,
    kind: FeedKind,
    feed: &Feed,
    focused: bool,
    is_favorite: impl Fn(u64) -> bool,
) {
    let title_style = if focused {
        Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::White).add_modifier(Modifier::BOLD)
    };
    let block = Block::default()
        .borders(Borders::TOP)
        .title(Span::styled(format!(" {} ", kind.title()), title_style))
        .border_style(border_style(focused));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let notice = match &feed.status {
        FeedStatus::Idle | FeedStatus::Loading => Some(("Loading...".to_string(), Color::Yellow)),
        FeedStatus::Failed(message) => Some((format!("No data: {message}"), Color::Red)),
        FeedStatus::Loaded if feed.items.is_empty() => {
            Some(("No data".to_string(), Color::DarkGray))
        }
        FeedStatus::Loaded => None,
    };
    if let Some((text, color)) = notice {
        frame.render_widget(Paragraph::new(text).style(Style::default().fg(color)), inner);
        return;
    }

    let visible = (inner.width / CARD_WIDTH).max(1) as usize;
    let first = scroll_offset(feed.selected_index, visible);

    let cards = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(vec![Constraint::Length(CARD_WIDTH); visible])
        .split(inner);

    for (slot, card_area) in cards.iter().enumerate() {
        let index = first + slot;
        if let Some(movie) = feed.items.get(index) {
            let selected = focused && index == feed.selected_index;
            render_movie_card(frame, *card_area, movie, selected, is_favorite(movie.id));
        }
    }
}

fn render_search_grid(
    frame: &mut Frame,
    area: Rect,
    ctx: &ContentContext,
    search: &SearchState,
    grid_index: usize,
    is_focused: bool,
) {
    let title = match &search.committed_query {
        Some(query) => format!(" Results for \"{query}\" "),
        None => " Results ".to_string(),
    };

    if search.results.is_empty() {
        let (text, color) = match search.mode {
            SearchMode::PendingSearch | SearchMode::Searching => {
                ("Searching...".to_string(), Color::Yellow)
            }
            _ => (
                format!("No results found for \"{}\"", search.query.trim()),
                Color::DarkGray,
            ),
        };
        render_message(frame, area, &title, &text, color, is_focused);
        return;
    }

    let block = Block::default()
        .borders(Borders::ALL)
        .title(title)
        .border_style(border_style(is_focused));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let movies: Vec<&MovieSummary> = search.results.iter().collect();
    let selected = is_focused.then_some(grid_index);
    render_movie_grid(frame, inner, &movies, GRID_COLUMNS, selected, |id| ctx.is_favorite(id));
}

fn render_saved(
    frame: &mut Frame,
    area: Rect,
    ctx: &ContentContext,
    selected_index: usize,
    is_focused: bool,
) {
    if !ctx.favorites_ready {
        render_message(frame, area, " Saved ", "Loading...", Color::Yellow, is_focused);
        return;
    }

    if ctx.favorites.is_empty() {
        render_message(
            frame,
            area,
            " Saved ",
            "You haven't saved any movies yet.",
            Color::DarkGray,
            is_focused,
        );
        return;
    }

    let block = Block::default()
        .borders(Borders::ALL)
        .title(format!(" Saved ({}) ", ctx.favorites.len()))
        .border_style(border_style(is_focused));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let movies: Vec<&MovieSummary> = ctx.favorites.iter().map(|record| &record.movie).collect();
    render_movie_grid(frame, inner, &movies, GRID_COLUMNS, Some(selected_index), |_| true);
}

fn render_movie_detail(
    frame: &mut Frame,
    area: Rect,
    detail: &MovieDetail,
    is_favorite: bool,
    image_urls: &ImageUrls,
) {
    let movie = &detail.summary;
    let label = Style::default().fg(Color::DarkGray);

    let mut meta = vec![
        Span::styled(rating_stars(movie.vote_average), Style::default().fg(Color::Yellow)),
        Span::styled(format!(" {:.1}", movie.vote_average), Style::default().fg(Color::White)),
        Span::styled("  |  ", label),
        Span::raw(release_year_label(movie)),
    ];
    if let Some(runtime) = detail.runtime {
        meta.push(Span::styled("  |  ", label));
        meta.push(Span::raw(format!("{runtime} min")));
    }

    let genres: Vec<Span> = detail
        .genres
        .iter()
        .flat_map(|genre| {
            [
                Span::styled(format!("[{}]", genre.name), Style::default().fg(Color::Magenta)),
                Span::raw(" "),
            ]
        })
        .collect();

    let favorite_line = if is_favorite {
        Line::from(Span::styled(
            "♥ Saved to favorites (f to remove)",
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        ))
    } else {
        Line::from(Span::styled("♡ Press f to add to favorites", label))
    };

    let overview = if detail.overview.trim().is_empty() {
        "No overview available.".to_string()
    } else {
        detail.overview.clone()
    };

    let image_line = |name: &'static str, url: Option<String>| {
        Line::from(vec![
            Span::styled(format!("{name:<9}"), label),
            Span::styled(
                url.unwrap_or_else(|| "none".to_string()),
                Style::default().fg(Color::Cyan),
            ),
        ])
    };

    let lines = vec![
        Line::from(Span::styled(
            movie.title.clone(),
            Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
        )),
        Line::from(meta),
        Line::from(genres),
        Line::raw(""),
        favorite_line,
        Line::raw(""),
        Line::from(Span::styled(
            "Plot Summary",
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
        )),
        Line::raw(overview),
        Line::raw(""),
        image_line(
            "Poster",
            movie.poster_path.as_deref().map(|path| image_urls.poster_url(path)),
        ),
        image_line(
            "Backdrop",
            movie.backdrop_path.as_deref().map(|path| image_urls.backdrop_url(path)),
        ),
    ];

    let widget = Paragraph::new(lines).wrap(Wrap { trim: false }).block(
        Block::default()
            .borders(Borders::ALL)
            .title(" Movie (Esc to go back) ")
            .padding(Padding::horizontal(1))
            .border_style(border_style(true)),
    );
    frame.render_widget(widget, area);
}
