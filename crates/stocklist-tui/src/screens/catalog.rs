//! Catalog screen: category tabs, alphabet filter, product table and the
//! detail panel for the single expanded product.

use std::collections::BTreeMap;
use std::sync::Arc;

use color_eyre::eyre::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Cell, Paragraph, Row, Table, TableState};
use throbber_widgets_tui::{Throbber, ThrobberState};

use stocklist_core::{AvailabilityTable, Category, GroupedCatalog, Product, Selection};

use crate::action::Action;
use crate::component::Component;
use crate::theme;
use crate::widgets::{alphabet, stock_badge, sub_tabs};

pub struct CatalogScreen {
    selection: Selection,
    categories: BTreeMap<Category, Arc<GroupedCatalog>>,
    availability: AvailabilityTable,
    table_state: TableState,
    throbber_state: ThrobberState,
    loading: bool,
}

impl CatalogScreen {
    pub fn new(selection: Selection) -> Self {
        Self {
            selection,
            categories: BTreeMap::new(),
            availability: AvailabilityTable::default(),
            table_state: TableState::default(),
            throbber_state: ThrobberState::default(),
            loading: true,
        }
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    fn grouped(&self) -> Option<&Arc<GroupedCatalog>> {
        self.categories.get(&self.selection.category())
    }

    /// Products of the selected category under the selected letter.
    fn visible(&self) -> &[Product] {
        self.grouped()
            .map_or(&[], |g| g.products_for(self.selection.letter()))
    }

    fn present_letters(&self) -> Vec<char> {
        self.grouped().map(|g| g.letters()).unwrap_or_default()
    }

    fn selected_index(&self) -> usize {
        self.table_state.selected().unwrap_or(0)
    }

    fn selected_product(&self) -> Option<&Product> {
        self.visible().get(self.selected_index())
    }

    /// Put the cursor on the expanded product if it is visible, else on top.
    fn reset_cursor(&mut self) {
        let len = self.visible().len();
        if len == 0 {
            self.table_state.select(None);
            return;
        }
        let expanded = self
            .selection
            .expanded()
            .and_then(|id| self.visible().iter().position(|p| &p.id == id));
        self.table_state.select(Some(expanded.unwrap_or(0)));
    }

    fn clamp_cursor(&mut self) {
        let len = self.visible().len();
        match self.table_state.selected() {
            _ if len == 0 => self.table_state.select(None),
            Some(i) if i >= len => self.table_state.select(Some(len - 1)),
            None => self.table_state.select(Some(0)),
            Some(_) => {}
        }
    }

    fn move_selection(&mut self, delta: isize) {
        let len = self.visible().len();
        if len == 0 {
            return;
        }
        let next = self.selected_index().saturating_add_signed(delta).min(len - 1);
        self.table_state.select(Some(next));
    }

    /// The neighbouring letter on the alphabet bar, if any.
    fn step_letter(&self, forward: bool) -> Option<char> {
        let letters = alphabet::bar_letters(&self.present_letters());
        let current = self.selection.letter();
        if forward {
            letters.into_iter().find(|&c| c > current)
        } else {
            letters.into_iter().rev().find(|&c| c < current)
        }
    }

    fn select_letter(&mut self, letter: char) {
        self.selection.select_letter(letter);
        self.reset_cursor();
    }

    fn select_category(&mut self, category: Category) {
        self.selection.select_category(category);
        self.reset_cursor();
    }

    // ── Rendering ───────────────────────────────────────────────

    fn render_throbber(&self, frame: &mut Frame, area: Rect) {
        let layout = Layout::vertical([
            Constraint::Min(0),
            Constraint::Length(1),
            Constraint::Min(0),
        ])
        .split(area);

        let throbber = Throbber::default()
            .label(format!("  Loading {}\u{2026}", self.selection.category()))
            .style(Style::default().fg(theme::HEADING))
            .throbber_style(Style::default().fg(theme::ACCENT));

        frame.render_stateful_widget(throbber, layout[1], &mut self.throbber_state.clone());
    }

    fn render_table(&self, frame: &mut Frame, area: Rect) {
        let products = self.visible();
        let block = Block::default()
            .title(format!(
                " {} \u{b7} {} ({}) ",
                self.selection.category().title(),
                self.selection.letter(),
                products.len()
            ))
            .title_style(theme::panel_title())
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(theme::frame_active());

        let inner = block.inner(area);
        frame.render_widget(block, area);

        if products.is_empty() {
            frame.render_widget(
                Paragraph::new(Span::styled(
                    format!("  No products starting with '{}'", self.selection.letter()),
                    theme::hint(),
                )),
                inner,
            );
            return;
        }

        let header = Row::new(vec![
            Cell::from("Name").style(theme::column_header()),
            Cell::from("Price").style(theme::column_header()),
            Cell::from("Manufacturer").style(theme::column_header()),
            Cell::from("Availability").style(theme::column_header()),
        ]);

        let selected_idx = self.selected_index();
        let rows: Vec<Row> = products
            .iter()
            .enumerate()
            .map(|(i, product)| {
                let is_selected = i == selected_idx;
                let marker = if self.selection.is_expanded(&product.id) {
                    "\u{25be} "
                } else {
                    "\u{25b8} "
                };
                let availability = self.availability.lookup(&product.manufacturer, &product.id);

                Row::new(vec![
                    Cell::from(format!("{marker}{}", product.name)).style(
                        Style::default().fg(theme::HEADING).add_modifier(if is_selected {
                            Modifier::BOLD
                        } else {
                            Modifier::empty()
                        }),
                    ),
                    Cell::from(product.price_label()),
                    Cell::from(product.manufacturer.clone()),
                    Cell::from(Line::from(stock_badge::availability_span(&availability))),
                ])
                .style(if is_selected {
                    theme::row_cursor()
                } else {
                    theme::row()
                })
            })
            .collect();

        let widths = [
            Constraint::Min(20),
            Constraint::Length(8),
            Constraint::Length(14),
            Constraint::Length(28),
        ];

        let table = Table::new(rows, widths)
            .header(header)
            .row_highlight_style(theme::row_cursor());

        let mut state = self.table_state;
        frame.render_stateful_widget(table, inner, &mut state);
    }

    fn render_detail(&self, frame: &mut Frame, area: Rect, product: &Product) {
        let block = Block::default()
            .title(format!(" {} ", product.name))
            .title_style(theme::panel_title())
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(theme::frame_idle());

        let inner = block.inner(area);
        frame.render_widget(block, area);

        let label = Style::default().fg(theme::TEXT);
        let value = Style::default().fg(theme::HEADING);
        let availability = self.availability.lookup(&product.manufacturer, &product.id);

        let field = |name: &'static str, text: String| {
            Line::from(vec![
                Span::styled(format!("  {name:<14}"), label),
                Span::styled(text, value),
            ])
        };

        let lines = vec![
            field("ID", product.id.to_string()),
            field("Type", product.product_type.clone()),
            field("Price", product.price_label()),
            field("Manufacturer", product.manufacturer.clone()),
            Line::from(vec![
                Span::styled(format!("  {:<14}", "Availability"), label),
                stock_badge::availability_span(&availability),
            ]),
            field("Colors", product.colors_label()),
        ];
        frame.render_widget(Paragraph::new(lines), inner);
    }
}

impl Component for CatalogScreen {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        let action = match (key.modifiers, key.code) {
            (_, KeyCode::Char(c @ '1'..='3')) => Category::all()
                .zip('1'..='3')
                .find_map(|(category, k)| (k == c).then_some(Action::SelectCategory(category))),
            (KeyModifiers::NONE, KeyCode::Tab) => Some(Action::NextCategory),
            (_, KeyCode::BackTab) => Some(Action::PrevCategory),

            (_, KeyCode::Char(c)) if c.is_ascii_uppercase() || c == '#' => {
                Some(Action::SelectLetter(c))
            }
            (KeyModifiers::NONE, KeyCode::Char('h') | KeyCode::Left) => Some(Action::PrevLetter),
            (KeyModifiers::NONE, KeyCode::Char('l') | KeyCode::Right) => Some(Action::NextLetter),

            (KeyModifiers::NONE, KeyCode::Char('j') | KeyCode::Down) => {
                self.move_selection(1);
                None
            }
            (KeyModifiers::NONE, KeyCode::Char('k') | KeyCode::Up) => {
                self.move_selection(-1);
                None
            }
            (KeyModifiers::NONE, KeyCode::Home) => {
                self.move_selection(isize::MIN);
                None
            }
            (KeyModifiers::NONE, KeyCode::End) => {
                self.move_selection(isize::MAX);
                None
            }

            (KeyModifiers::NONE, KeyCode::Enter | KeyCode::Char(' ')) => self
                .selected_product()
                .map(|p| Action::ToggleProduct(p.id.clone())),
            (KeyModifiers::NONE, KeyCode::Esc) => {
                self.selection.expanded().map(|_| Action::Collapse)
            }
            _ => None,
        };
        Ok(action)
    }

    fn update(&mut self, action: &Action) -> Result<Option<Action>> {
        match action {
            Action::SelectCategory(category) => self.select_category(*category),
            Action::NextCategory => self.select_category(self.selection.category().next()),
            Action::PrevCategory => self.select_category(self.selection.category().prev()),

            Action::SelectLetter(letter) => self.select_letter(*letter),
            Action::NextLetter => {
                if let Some(letter) = self.step_letter(true) {
                    self.select_letter(letter);
                }
            }
            Action::PrevLetter => {
                if let Some(letter) = self.step_letter(false) {
                    self.select_letter(letter);
                }
            }

            Action::ToggleProduct(id) => {
                self.selection.toggle_product(id);
                if let Some(pos) = self.visible().iter().position(|p| &p.id == id) {
                    self.table_state.select(Some(pos));
                }
            }
            Action::Collapse => self.selection.collapse(),

            Action::LoadStarted => {
                self.loading = true;
                self.categories.clear();
                self.availability = AvailabilityTable::default();
                self.table_state.select(None);
            }
            Action::CategoryLoaded(category, grouped) => {
                self.categories.insert(*category, Arc::clone(grouped));
                if *category == self.selection.category() {
                    self.clamp_cursor();
                }
            }
            Action::AvailabilityUpdated(table) => self.availability = table.clone(),
            Action::LoadFinished => self.loading = false,

            Action::Tick if self.loading => self.throbber_state.calc_next(),

            _ => {}
        }
        Ok(None)
    }

    fn render(&self, frame: &mut Frame, area: Rect) {
        let layout = Layout::vertical([
            Constraint::Length(1), // category tabs
            Constraint::Length(1), // alphabet
            Constraint::Min(3),    // body
            Constraint::Length(1), // hints
        ])
        .split(area);

        let tabs = sub_tabs::category_tabs(self.selection.category(), |c| {
            self.categories.get(&c).map(|g| g.len())
        });
        frame.render_widget(Paragraph::new(tabs), layout[0]);

        let letters = alphabet::alphabet_bar(&self.present_letters(), self.selection.letter());
        frame.render_widget(Paragraph::new(letters), layout[1]);

        let body = layout[2];
        if self.grouped().is_none() {
            if self.loading {
                self.render_throbber(frame, body);
            } else {
                frame.render_widget(
                    Paragraph::new(Span::styled(
                        format!("  No {} data. Press r to reload.", self.selection.category()),
                        theme::hint(),
                    )),
                    body,
                );
            }
        } else {
            let expanded = self
                .selection
                .expanded()
                .and_then(|id| self.visible().iter().find(|p| &p.id == id));

            match expanded {
                Some(product) => {
                    let chunks =
                        Layout::vertical([Constraint::Min(3), Constraint::Length(8)]).split(body);
                    self.render_table(frame, chunks[0]);
                    self.render_detail(frame, chunks[1], product);
                }
                None => self.render_table(frame, body),
            }
        }

        let hints = Line::from(vec![
            Span::styled("  1-3 ", theme::hint_key()),
            Span::styled("category  ", theme::hint()),
            Span::styled("h/l A-Z ", theme::hint_key()),
            Span::styled("letter  ", theme::hint()),
            Span::styled("j/k ", theme::hint_key()),
            Span::styled("move  ", theme::hint()),
            Span::styled("Enter ", theme::hint_key()),
            Span::styled("expand  ", theme::hint()),
            Span::styled("r ", theme::hint_key()),
            Span::styled("reload", theme::hint()),
        ]);
        frame.render_widget(Paragraph::new(hints), layout[3]);
    }
}
