use super::*;

pub(super) fn draw_create_form(frame: &mut Frame, app: &App, area: Rect) {
    let Some(list) = app.session.list() else {
        return;
    };
    let Some(draft) = list.form.draft() else {
        return;
    };

    let mut dialog = DialogBuilder::new("New server").width(60).empty_line();
    for field in FormField::all() {
        let focused = *field == app.form_field;
        let value = field.value(draft).to_string();
        let spans = match field {
            FormField::Version if focused => vec![
                Span::styled("◀ ", Style::default().fg(Color::DarkGray)),
                Span::raw(value),
                Span::styled(" ▶", Style::default().fg(Color::DarkGray)),
            ],
            FormField::Difficulty => {
                let label = draft.difficulty_label().unwrap_or("?");
                vec![
                    Span::raw(value),
                    Span::styled(format!(" ({})", label), Style::default().fg(Color::DarkGray)),
                ]
            }
            _ if focused => vec![
                Span::raw(value),
                Span::styled(" ", Style::default().add_modifier(Modifier::REVERSED)),
            ],
            _ => vec![Span::raw(value)],
        };
        dialog = dialog.field(field.label(), spans, focused);
    }

    dialog
        .empty_line()
        .errors(list.form.errors())
        .help("Tab: Next field  ←/→: Cycle  Enter: Create  Esc: Cancel")
        .render(frame, area);
}

pub(super) fn draw_make_dir(frame: &mut Frame, app: &App, area: Rect) {
    let errors = app
        .session
        .workspace()
        .map(|ws| ws.errors().to_vec())
        .unwrap_or_default();

    DialogBuilder::new("New directory")
        .empty_line()
        .field("Name", app.dir_input.spans(true), true)
        .empty_line()
        .errors(&errors)
        .help("Enter: Create  Esc: Cancel")
        .render(frame, area);
}

pub(super) fn draw_upload(frame: &mut Frame, app: &App, area: Rect) {
    let Some(ws) = app.session.workspace() else {
        return;
    };
    let target = if ws.nav().is_root() {
        "Uploading to the workspace root".to_string()
    } else {
        format!("Uploading to {}", ws.nav().current_path)
    };

    DialogBuilder::new("Upload files")
        .width(70)
        .empty_line()
        .message(format!("  {}", target))
        .field("Files", app.upload_input.spans(true), true)
        .empty_line()
        .errors(ws.errors())
        .help("Paths separated by spaces  Enter: Upload  Esc: Cancel")
        .render(frame, area);
}
