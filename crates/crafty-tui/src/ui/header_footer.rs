use super::*;

pub(super) fn draw_header(frame: &mut Frame, app: &App, area: Rect) {
    let separator = Span::styled(" › ", Style::default().fg(Color::DarkGray));
    let mut crumbs = vec![Span::styled("Servers", Style::default().fg(Color::White).bold())];

    if let Route::Workspace { name, .. } = app.session.route() {
        crumbs.push(separator.clone());
        crumbs.push(Span::styled(name.clone(), Style::default().fg(Color::Yellow)));
        if let Some(ws) = app.session.workspace() {
            for segment in ws.nav().segments() {
                crumbs.push(separator.clone());
                crumbs.push(Span::raw(segment.to_string()));
            }
        }
    }

    let header = Paragraph::new(Line::from(crumbs)).block(
        Block::default()
            .title(" crafty - Minecraft Server Manager ")
            .title_style(Style::default().fg(Color::Cyan).bold())
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan)),
    );

    frame.render_widget(header, area);
}

/// Context-sensitive key help
pub(super) fn footer_help(app: &App) -> String {
    let help = match app.session.view() {
        ViewState::List(list) => {
            if list.form.is_open() {
                "Tab: Next field  ←/→: Cycle  Enter: Create  Esc: Cancel".to_string()
            } else if list.containers.is_empty() {
                "n: New  r: Refresh  q: Quit".to_string()
            } else {
                "j/k: Navigate  Enter: Files  n: New  s: Start  x: Stop  R: Restart  d: Remove  D: Download  r: Refresh  q: Quit".to_string()
            }
        }
        ViewState::Workspace(ws) => {
            if ws.context_menu.is_open() {
                "j/k: Select  Enter: Run  Esc: Close".to_string()
            } else if ws.modal.is_open() {
                "Enter: Confirm  Esc: Cancel".to_string()
            } else {
                let mut keys = vec!["j/k: Navigate", "Enter: Open"];
                if ws.nav().can_go_up() {
                    keys.push("u: Up");
                }
                keys.extend([
                    "h: Home",
                    "m: New dir",
                    "U: Upload",
                    "Right-click: Menu",
                    "r: Refresh",
                    "q: Quit",
                ]);
                keys.join("  ")
            }
        }
    };

    let modal_open = match app.session.view() {
        ViewState::List(list) => list.form.is_open(),
        ViewState::Workspace(ws) => ws.context_menu.is_open() || ws.modal.is_open(),
    };
    if app.session.router().can_go_back() && !modal_open {
        format!("{}  b: Back", help)
    } else {
        help
    }
}

pub(super) fn draw_footer(frame: &mut Frame, app: &App, area: Rect) {
    let mut line = vec![Span::styled(
        footer_help(app),
        Style::default().fg(Color::DarkGray),
    )];
    if let Some(status) = &app.status_message {
        line.push(Span::raw("  "));
        line.push(Span::styled(status.clone(), Style::default().fg(Color::Yellow)));
    }

    let footer = Paragraph::new(Line::from(line))
        .block(Block::default().borders(Borders::ALL))
        .wrap(Wrap { trim: true });

    frame.render_widget(footer, area);
}
