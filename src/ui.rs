//! TUI rendering for Reelspot
//!
//! Draws a [`ScreenView`] with `ratatui`: banner, query input, submit hint,
//! the optional movie and map panels, a status footer, and the modal notice.

use crate::app::App;
use crate::errors::Notice;
use crate::viewmodel::{MapView, MoviePanel, PosterView, ScreenView, MAP_HEADING};
use ratatui::{
    prelude::*,
    widgets::{canvas::*, *},
};

use ratatui::text::Line;

const MAP_PANEL_HEIGHT: u16 = 12;

/// Renders one frame of the TUI based on current application state.
///
/// # Arguments
///
/// * `f` - The ratatui frame to draw into (from `terminal.draw()`).
/// * `app` - Current application state.
pub fn render(f: &mut Frame, app: &App) {
    let view = ScreenView::from_app(app);

    let map_height = if view.map.is_some() { MAP_PANEL_HEIGHT } else { 0 };
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Banner
            Constraint::Length(3), // Input
            Constraint::Length(1), // Submit hint
            Constraint::Min(0),    // Movie
            Constraint::Length(map_height),
            Constraint::Length(1), // Footer
        ])
        .split(f.size());

    let banner = Paragraph::new(view.banner)
        .style(Style::default().add_modifier(Modifier::BOLD))
        .alignment(Alignment::Center);
    f.render_widget(banner, chunks[0]);

    let input_style = if view.input.is_placeholder {
        Style::default().fg(Color::DarkGray)
    } else {
        Style::default()
    };
    let input = Paragraph::new(Span::styled(view.input.text.as_str(), input_style)).block(
        Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded),
    );
    f.render_widget(input, chunks[1]);

    let hint = Paragraph::new(view.submit_hint)
        .style(Style::default().fg(Color::Cyan))
        .alignment(Alignment::Center);
    f.render_widget(hint, chunks[2]);

    if let Some(ref movie) = view.movie {
        render_movie_panel(f, movie, chunks[3]);
    }

    if let Some(ref map) = view.map {
        render_map_panel(f, map, chunks[4]);
    }

    let footer = Paragraph::new(Line::from(vec![
        Span::styled(
            view.status.unwrap_or(""),
            Style::default().fg(Color::Yellow),
        ),
        Span::styled(
            "  Enter search │ Esc quit",
            Style::default().fg(Color::DarkGray),
        ),
    ]));
    f.render_widget(footer, chunks[5]);

    if let Some(notice) = view.notice {
        render_notice(f, notice);
    }
}

/// Movie details: title line, one line per field, then the poster.
///
/// The terminal cannot draw images, so a poster is shown as its URL.
fn render_movie_panel(f: &mut Frame, movie: &MoviePanel, area: Rect) {
    let bold = Style::default().add_modifier(Modifier::BOLD);

    let mut lines = vec![Line::from(Span::styled(
        movie.title.as_str(),
        bold.fg(Color::Yellow),
    ))];
    for (label, value) in &movie.lines {
        lines.push(Line::from(vec![
            Span::styled(format!("{}: ", label), bold),
            Span::raw(value.as_str()),
        ]));
    }
    lines.push(Line::from(""));
    lines.push(match &movie.poster {
        PosterView::Image { url } => Line::from(vec![
            Span::styled("Poster: ", bold),
            Span::styled(url.as_str(), Style::default().fg(Color::Blue)),
        ]),
        PosterView::Placeholder(text) => {
            Line::from(Span::styled(*text, Style::default().fg(Color::DarkGray)))
        }
    });

    let p = Paragraph::new(lines).wrap(Wrap { trim: true }).block(
        Block::default()
            .title(" Movie Details ")
            .borders(Borders::ALL)
            .padding(Padding::horizontal(1)),
    );
    f.render_widget(p, area);
}

/// Canvas map centered on the fix, with its marker(s) printed on top.
fn render_map_panel(f: &mut Frame, map: &MapView, area: Rect) {
    let canvas = Canvas::default()
        .block(Block::bordered().title(format!(" {} ", MAP_HEADING)))
        .marker(symbols::Marker::Braille)
        .x_bounds(map.x_bounds())
        .y_bounds(map.y_bounds())
        .paint(|ctx| {
            ctx.draw(&Map {
                color: Color::Rgb(50, 50, 50),
                resolution: MapResolution::High,
            });
            ctx.layer();

            for marker in &map.markers {
                ctx.print(
                    marker.position.longitude,
                    marker.position.latitude,
                    Line::from(Span::styled(
                        format!("⌖ {}", marker.label),
                        Style::default().fg(Color::Cyan),
                    )),
                );
            }
        });

    f.render_widget(canvas, area);
}

fn render_notice(f: &mut Frame, notice: Notice) {
    let area = centered_rect(60, 7, f.size());

    let p = Paragraph::new(vec![
        Line::from(notice.message()),
        Line::from(""),
        Line::from(Span::styled(
            "[Enter] OK",
            Style::default().fg(Color::DarkGray),
        )),
    ])
    .wrap(Wrap { trim: true })
    .alignment(Alignment::Center)
    .block(
        Block::default()
            .title(format!(" {} ", notice.heading()))
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(Color::Yellow)),
    );

    f.render_widget(Clear, area);
    f.render_widget(p, area);
}

/// A `percent_x` wide, `height` tall rectangle centered in `r`.
fn centered_rect(percent_x: u16, height: u16, r: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),
            Constraint::Length(height),
            Constraint::Min(0),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1])[1]
}
