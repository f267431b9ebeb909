use super::*;

pub(super) fn draw_files(frame: &mut Frame, app: &mut App, area: Rect) {
    let Some(ws) = app.session.workspace() else {
        return;
    };
    let nav = ws.nav();
    let title = format!(" {}:/{} ", nav.container_name, nav.current_path);
    let files = ws.files().snapshot();
    let block = Block::default().title(title).borders(Borders::ALL);
    app.files_area = block.inner(area);

    if files.is_empty() {
        let hint = if nav.can_go_up() {
            "Empty directory.\n\nBackspace: up one level  U: upload  m: new directory"
        } else {
            "Empty workspace.\n\nU: upload  m: new directory  (or drop files here)"
        };
        let empty = Paragraph::new(hint)
            .style(Style::default().fg(Color::DarkGray))
            .block(block)
            .wrap(Wrap { trim: true });
        frame.render_widget(empty, area);
        return;
    }

    let items: Vec<ListItem> = files
        .iter()
        .map(|entry| {
            if entry.is_dir {
                ListItem::new(Line::from(vec![
                    Span::styled("▸ ", Style::default().fg(Color::Blue)),
                    Span::styled(
                        format!("{}/", entry.name),
                        Style::default().fg(Color::Blue).bold(),
                    ),
                ]))
            } else {
                ListItem::new(Line::from(vec![Span::raw("  "), Span::raw(entry.name.clone())]))
            }
        })
        .collect();

    let list = List::new(items)
        .block(block)
        .highlight_style(Style::default().bg(Color::DarkGray).fg(Color::White));

    frame.render_stateful_widget(list, area, &mut app.file_state);
}

pub(super) fn draw_context_menu(frame: &mut Frame, app: &App, area: Rect) {
    let Some(menu) = app.session.workspace().and_then(|ws| ws.context_menu.get()) else {
        return;
    };
    let rect = context_menu_rect(menu.x, menu.y, area);

    let lines: Vec<Line> = ContextAction::all()
        .iter()
        .enumerate()
        .map(|(i, action)| {
            if i == app.context_selected {
                Line::from(Span::styled(
                    format!(" {} ", action.label()),
                    Style::default().bg(Color::Cyan).fg(Color::Black).bold(),
                ))
            } else {
                Line::from(format!(" {} ", action.label()))
            }
        })
        .collect();

    frame.render_widget(Clear, rect);
    frame.render_widget(
        Paragraph::new(lines).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Yellow)),
        ),
        rect,
    );
}
