use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Layout, Margin, Rect},
    style::{Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};
use crate::tui::{Choice, Element, Layer, LayoutConstraint, Theme};

mod interaction_registry;

pub use interaction_registry::InteractionRegistry;

/// Renders elements to the terminal
pub struct Renderer;

impl Renderer {
    pub fn render<Msg: Clone>(
        frame: &mut Frame,
        theme: &Theme,
        registry: &mut InteractionRegistry<Msg>,
        element: &Element<Msg>,
        area: Rect,
    ) {
        Self::render_element(frame, theme, registry, element, area);
    }

    fn render_element<Msg: Clone>(
        frame: &mut Frame,
        theme: &Theme,
        registry: &mut InteractionRegistry<Msg>,
        element: &Element<Msg>,
        area: Rect,
    ) {
        if area.width == 0 || area.height == 0 {
            return;
        }

        match element {
            Element::None => {}

            Element::Text { content, style } => {
                let style = style.unwrap_or_else(|| Style::default().fg(theme.text));
                frame.render_widget(Paragraph::new(content.as_str()).style(style), area);
            }

            Element::StyledText { line } => {
                frame.render_widget(Paragraph::new(line.clone()), area);
            }

            Element::Paragraph { lines } => {
                let widget = Paragraph::new(Text::from(lines.clone()))
                    .style(Style::default().fg(theme.text))
                    .wrap(Wrap { trim: true });
                frame.render_widget(widget, area);
            }

            Element::Button {
                label,
                on_press,
                style,
            } => {
                if let Some(msg) = on_press {
                    registry.register_click(area, msg.clone());
                }
                let default_style = Style::default().fg(theme.lavender).add_modifier(Modifier::BOLD);
                let widget = Paragraph::new(format!("[ {} ]", label))
                    .alignment(Alignment::Left)
                    .style(style.unwrap_or(default_style));
                frame.render_widget(widget, area);
            }

            Element::Choices {
                items,
                cursor,
                multi,
                on_select,
            } => {
                Self::render_choices(frame, theme, registry, items, *cursor, *multi, *on_select, area);
            }

            Element::Column { items, spacing } => {
                let areas = Layout::vertical(items.iter().map(|(c, _)| to_constraint(*c)))
                    .spacing(*spacing)
                    .split(area);
                for ((_, child), child_area) in items.iter().zip(areas.iter()) {
                    Self::render_element(frame, theme, registry, child, *child_area);
                }
            }

            Element::Row { items, spacing } => {
                let areas = Layout::horizontal(items.iter().map(|(c, _)| to_constraint(*c)))
                    .spacing(*spacing)
                    .split(area);
                for ((_, child), child_area) in items.iter().zip(areas.iter()) {
                    Self::render_element(frame, theme, registry, child, *child_area);
                }
            }

            Element::Container { child, padding } => {
                let inner = area.inner(Margin {
                    horizontal: *padding * 2,
                    vertical: *padding,
                });
                Self::render_element(frame, theme, registry, child, inner);
            }

            Element::Panel { child, title } => {
                let mut block = Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(theme.overlay1))
                    .style(Style::default().bg(theme.base));
                if let Some(title_text) = title {
                    block = block.title(Span::styled(
                        format!(" {} ", title_text),
                        Style::default().fg(theme.mauve).add_modifier(Modifier::BOLD),
                    ));
                }

                let inner_area = block.inner(area);
                frame.render_widget(block, area);
                Self::render_element(frame, theme, registry, child, inner_area);
            }

            Element::Stack { layers } => {
                for layer in layers {
                    let layer_area = Self::layer_position(layer, area);
                    if layer.centered.is_some() {
                        Self::render_dim_overlay(frame, theme, area);
                        frame.render_widget(Clear, layer_area);
                    }
                    Self::render_element(frame, theme, registry, &layer.element, layer_area);
                }

                // Only the topmost layer stays interactive
                registry.clear();
                if let Some(top) = layers.last() {
                    let layer_area = Self::layer_position(top, area);
                    Self::render_element(frame, theme, registry, &top.element, layer_area);
                }
            }
        }
    }

    #[allow(clippy::too_many_arguments)]
    fn render_choices<Msg: Clone>(
        frame: &mut Frame,
        theme: &Theme,
        registry: &mut InteractionRegistry<Msg>,
        items: &[Choice],
        cursor: usize,
        multi: bool,
        on_select: Option<fn(usize) -> Msg>,
        area: Rect,
    ) {
        let mut y = area.y;
        let bottom = area.y + area.height;

        for (idx, item) in items.iter().enumerate() {
            if y >= bottom {
                break;
            }

            let focused = idx == cursor;
            let marker = match (multi, item.checked) {
                (true, true) => "[x]",
                (true, false) => "[ ]",
                (false, true) => "(•)",
                (false, false) => "( )",
            };
            let pointer = if focused { "› " } else { "  " };

            let label_style = if focused {
                Style::default().fg(theme.lavender).add_modifier(Modifier::BOLD)
            } else if item.checked {
                Style::default().fg(theme.green)
            } else {
                Style::default().fg(theme.text)
            };

            let height = item.height().min(bottom - y);
            let item_area = Rect::new(area.x, y, area.width, height);

            let label = Line::from(vec![
                Span::styled(pointer, Style::default().fg(theme.lavender)),
                Span::styled(format!("{} ", marker), label_style),
                Span::styled(item.label.clone(), label_style),
            ]);
            frame.render_widget(Paragraph::new(label), Rect::new(area.x, y, area.width, 1));

            if let Some(detail) = &item.detail {
                if height > 1 {
                    let detail_line = Line::from(Span::styled(
                        format!("      {}", detail),
                        Style::default().fg(theme.subtext0),
                    ));
                    frame.render_widget(Paragraph::new(detail_line), Rect::new(area.x, y + 1, area.width, 1));
                }
            }

            if let Some(to_msg) = on_select {
                registry.register_click(item_area, to_msg(idx));
            }

            y += height;
        }
    }

    fn render_dim_overlay(frame: &mut Frame, theme: &Theme, area: Rect) {
        let dim_block = Block::default().style(Style::default().fg(theme.surface1).bg(theme.surface0));
        frame.render_widget(dim_block, area);
    }

    fn layer_position<Msg>(layer: &Layer<Msg>, container: Rect) -> Rect {
        match layer.centered {
            None => container,
            Some((width, height)) => {
                let width = width.min(container.width);
                let height = height.min(container.height);
                Rect {
                    x: container.x + (container.width - width) / 2,
                    y: container.y + (container.height - height) / 2,
                    width,
                    height,
                }
            }
        }
    }
}

fn to_constraint(constraint: LayoutConstraint) -> Constraint {
    match constraint {
        LayoutConstraint::Length(n) => Constraint::Length(n),
        LayoutConstraint::Fill(n) => Constraint::Fill(n),
    }
}
