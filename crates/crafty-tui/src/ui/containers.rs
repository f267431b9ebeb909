use super::*;

pub(super) fn draw_containers(frame: &mut Frame, app: &mut App, area: Rect) {
    let Some(list) = app.session.list() else {
        return;
    };
    let containers = list.containers.containers().snapshot();

    if containers.is_empty() {
        let empty = Paragraph::new(
            "No servers yet.\n\n\
             Press 'n' to create one.",
        )
        .style(Style::default().fg(Color::DarkGray))
        .block(Block::default().title(" Servers ").borders(Borders::ALL))
        .wrap(Wrap { trim: true });

        frame.render_widget(empty, area);
        return;
    }

    let header = Row::new(vec![
        Cell::from(" "),
        Cell::from("Name"),
        Cell::from("State"),
        Cell::from("Version"),
        Cell::from("Forge"),
        Cell::from("Ports"),
    ])
    .style(
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD),
    )
    .bottom_margin(1);

    let rows: Vec<Row> = containers
        .iter()
        .map(|container| {
            let (symbol, color) = state_style(&container.state);
            let forge = if container.has_forge() {
                container.forge_version.as_str()
            } else {
                "-"
            };

            Row::new(vec![
                Cell::from(symbol).style(Style::default().fg(color)),
                Cell::from(container.name.clone()).style(Style::default().bold()),
                Cell::from(container.state.to_string()).style(Style::default().fg(color)),
                Cell::from(container.version.clone()),
                Cell::from(forge.to_string()).style(Style::default().fg(Color::DarkGray)),
                Cell::from(container.ports.join(", ")),
            ])
        })
        .collect();

    let widths = [
        Constraint::Length(3),  // State icon
        Constraint::Length(24), // Name
        Constraint::Length(12), // State
        Constraint::Length(10), // Version
        Constraint::Length(14), // Forge
        Constraint::Min(10),    // Ports
    ];

    let table = Table::new(rows, widths)
        .header(header)
        .block(Block::default().title(" Servers ").borders(Borders::ALL))
        .highlight_style(Style::default().bg(Color::DarkGray).fg(Color::White))
        .highlight_symbol("▶ ");

    frame.render_stateful_widget(table, area, &mut app.table_state);
}
