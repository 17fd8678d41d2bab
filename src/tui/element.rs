use ratatui::style::Style;
use ratatui::text::Line;

/// One level of an [`Element::Stack`], painted in order
pub struct Layer<Msg> {
    pub element: Element<Msg>,
    /// Fixed (width, height) box centered over the area below; `None` fills it
    pub centered: Option<(u16, u16)>,
}

impl<Msg> Layer<Msg> {
    pub fn new(element: Element<Msg>) -> Self {
        Self {
            element,
            centered: None,
        }
    }

    pub fn center(mut self, width: u16, height: u16) -> Self {
        self.centered = Some((width, height));
        self
    }
}

/// How a child of a column or row claims space
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayoutConstraint {
    /// Exact cells
    Length(u16),
    /// Share of what is left, by weight
    Fill(u16),
}

/// One row of a choice list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Choice {
    pub label: String,
    pub detail: Option<String>,
    pub checked: bool,
}

impl Choice {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            detail: None,
            checked: false,
        }
    }

    pub fn detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }

    pub fn checked(mut self, checked: bool) -> Self {
        self.checked = checked;
        self
    }

    /// Rows this choice occupies when rendered
    pub fn height(&self) -> u16 {
        if self.detail.is_some() { 2 } else { 1 }
    }
}

/// View tree returned by `App::view` and drawn by the renderer.
///
/// Elements that carry a `Msg` register a click target while drawn.
pub enum Element<Msg> {
    None,

    /// One line, optionally styled
    Text { content: String, style: Option<Style> },

    /// One line of mixed spans
    StyledText { line: Line<'static> },

    /// Multi-line text wrapped to the available width
    Paragraph { lines: Vec<Line<'static>> },

    /// Clickable label
    Button {
        label: String,
        on_press: Option<Msg>,
        style: Option<Style>,
    },

    /// Single- or multi-select option list with a cursor
    Choices {
        items: Vec<Choice>,
        cursor: usize,
        multi: bool,
        on_select: Option<fn(usize) -> Msg>,
    },

    /// Children top to bottom
    Column {
        items: Vec<(LayoutConstraint, Element<Msg>)>,
        spacing: u16,
    },

    /// Children left to right
    Row {
        items: Vec<(LayoutConstraint, Element<Msg>)>,
        spacing: u16,
    },

    /// Uniform inner margin
    Container {
        child: Box<Element<Msg>>,
        padding: u16,
    },

    /// Rounded border with an optional title
    Panel {
        child: Box<Element<Msg>>,
        title: Option<String>,
    },

    /// Layers drawn bottom up; only the top one stays clickable
    Stack { layers: Vec<Layer<Msg>> },
}

impl<Msg> Element<Msg> {
    pub fn text(content: impl Into<String>) -> Self {
        Element::Text {
            content: content.into(),
            style: None,
        }
    }

    pub fn styled(content: impl Into<String>, style: Style) -> Self {
        Element::Text {
            content: content.into(),
            style: Some(style),
        }
    }

    pub fn styled_text(line: Line<'static>) -> Self {
        Element::StyledText { line }
    }

    pub fn paragraph(lines: Vec<Line<'static>>) -> Self {
        Element::Paragraph { lines }
    }

    pub fn button(label: impl Into<String>) -> ButtonBuilder<Msg> {
        ButtonBuilder {
            label: label.into(),
            on_press: None,
            style: None,
        }
    }

    pub fn choices(items: Vec<Choice>, cursor: usize) -> ChoicesBuilder<Msg> {
        ChoicesBuilder {
            items,
            cursor,
            multi: false,
            on_select: None,
        }
    }

    /// Children keep their [`Element::default_constraint`]
    pub fn column(children: Vec<Element<Msg>>) -> ColumnBuilder<Msg> {
        let items = children
            .into_iter()
            .map(|child| (child.default_constraint(), child))
            .collect();

        ColumnBuilder { items, spacing: 0 }
    }

    pub fn container(child: Element<Msg>) -> ContainerBuilder<Msg> {
        ContainerBuilder {
            child: Box::new(child),
            padding: 1,
        }
    }

    pub fn panel(child: Element<Msg>) -> PanelBuilder<Msg> {
        PanelBuilder {
            child: Box::new(child),
            title: None,
        }
    }

    pub fn stack(layers: Vec<Layer<Msg>>) -> Self {
        Element::Stack { layers }
    }

    /// Overlay a blocking message dialog on top of `background`
    pub fn alert(background: Element<Msg>, title: impl Into<String>, message: impl Into<String>) -> Self {
        let message = message.into();
        let width = (message.chars().count() as u16 + 6).clamp(30, 70);

        let body = ColumnBuilder::new()
            .add(Element::paragraph(vec![Line::from(message)]), LayoutConstraint::Fill(1))
            .add(Element::text("[Enter] OK"), LayoutConstraint::Length(1))
            .build();

        Element::stack(vec![
            Layer::new(background),
            Layer::new(
                Element::panel(Element::container(body).padding(1).build())
                    .title(title)
                    .build(),
            )
            .center(width, 8),
        ])
    }

    /// Fixed height for single-line and list elements, fill for the rest
    pub fn default_constraint(&self) -> LayoutConstraint {
        match self {
            Element::None => LayoutConstraint::Length(0),
            Element::Text { .. } | Element::StyledText { .. } => LayoutConstraint::Length(1),
            Element::Button { .. } => LayoutConstraint::Length(1),
            Element::Choices { items, .. } => {
                LayoutConstraint::Length(items.iter().map(Choice::height).sum())
            }
            Element::Paragraph { .. }
            | Element::Column { .. }
            | Element::Row { .. }
            | Element::Container { .. }
            | Element::Panel { .. }
            | Element::Stack { .. } => LayoutConstraint::Fill(1),
        }
    }
}

impl<Msg> Default for Element<Msg> {
    fn default() -> Self {
        Element::None
    }
}

pub struct ButtonBuilder<Msg> {
    label: String,
    on_press: Option<Msg>,
    style: Option<Style>,
}

impl<Msg> ButtonBuilder<Msg> {
    pub fn on_press(mut self, msg: Msg) -> Self {
        self.on_press = Some(msg);
        self
    }

    pub fn style(mut self, style: Style) -> Self {
        self.style = Some(style);
        self
    }

    pub fn build(self) -> Element<Msg> {
        Element::Button {
            label: self.label,
            on_press: self.on_press,
            style: self.style,
        }
    }
}

pub struct ChoicesBuilder<Msg> {
    items: Vec<Choice>,
    cursor: usize,
    multi: bool,
    on_select: Option<fn(usize) -> Msg>,
}

impl<Msg> ChoicesBuilder<Msg> {
    /// Render checkboxes instead of radio markers
    pub fn multi(mut self) -> Self {
        self.multi = true;
        self
    }

    pub fn on_select(mut self, msg: fn(usize) -> Msg) -> Self {
        self.on_select = Some(msg);
        self
    }

    pub fn build(self) -> Element<Msg> {
        Element::Choices {
            items: self.items,
            cursor: self.cursor,
            multi: self.multi,
            on_select: self.on_select,
        }
    }
}

pub struct ColumnBuilder<Msg> {
    items: Vec<(LayoutConstraint, Element<Msg>)>,
    spacing: u16,
}

impl<Msg> ColumnBuilder<Msg> {
    pub fn new() -> Self {
        Self {
            items: Vec::new(),
            spacing: 0,
        }
    }

    pub fn add(mut self, child: Element<Msg>, constraint: LayoutConstraint) -> Self {
        self.items.push((constraint, child));
        self
    }

    pub fn spacing(mut self, spacing: u16) -> Self {
        self.spacing = spacing;
        self
    }

    pub fn build(self) -> Element<Msg> {
        Element::Column {
            items: self.items,
            spacing: self.spacing,
        }
    }
}

impl<Msg> Default for ColumnBuilder<Msg> {
    fn default() -> Self {
        Self::new()
    }
}

pub struct RowBuilder<Msg> {
    items: Vec<(LayoutConstraint, Element<Msg>)>,
    spacing: u16,
}

impl<Msg> RowBuilder<Msg> {
    pub fn new() -> Self {
        Self {
            items: Vec::new(),
            spacing: 1,
        }
    }

    pub fn add(mut self, child: Element<Msg>, constraint: LayoutConstraint) -> Self {
        self.items.push((constraint, child));
        self
    }

    pub fn spacing(mut self, spacing: u16) -> Self {
        self.spacing = spacing;
        self
    }

    pub fn build(self) -> Element<Msg> {
        Element::Row {
            items: self.items,
            spacing: self.spacing,
        }
    }
}

impl<Msg> Default for RowBuilder<Msg> {
    fn default() -> Self {
        Self::new()
    }
}

pub struct ContainerBuilder<Msg> {
    child: Box<Element<Msg>>,
    padding: u16,
}

impl<Msg> ContainerBuilder<Msg> {
    pub fn padding(mut self, padding: u16) -> Self {
        self.padding = padding;
        self
    }

    pub fn build(self) -> Element<Msg> {
        Element::Container {
            child: self.child,
            padding: self.padding,
        }
    }
}

pub struct PanelBuilder<Msg> {
    child: Box<Element<Msg>>,
    title: Option<String>,
}

impl<Msg> PanelBuilder<Msg> {
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn build(self) -> Element<Msg> {
        Element::Panel {
            child: self.child,
            title: self.title,
        }
    }
}
