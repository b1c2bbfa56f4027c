// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

//! Per-column filter popover: key handling and text rendering over a
//! [`FilterDraft`].

use crmgrid_table::{DraftInput, FilterDraft, FilterKind, FilterValue};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PopoverAction {
    Edited,
    Apply,
    Clear,
    Cancel,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FilterPopover {
    pub column_id: String,
    pub header: String,
    pub draft: FilterDraft,
}

impl FilterPopover {
    pub fn new(
        column_id: impl Into<String>,
        header: impl Into<String>,
        draft: FilterDraft,
    ) -> Self {
        Self {
            column_id: column_id.into(),
            header: header.into(),
            draft,
        }
    }

    /// `None` when applying should remove the column's filter.
    pub fn filter(&self) -> Option<FilterValue> {
        self.draft.to_filter()
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> Option<PopoverAction> {
        let draft = &mut self.draft;
        match (key.code, key.modifiers) {
            (KeyCode::Esc, _) => Some(PopoverAction::Cancel),
            (KeyCode::Enter, _) => Some(PopoverAction::Apply),
            (KeyCode::Char('d'), modifiers) if modifiers.contains(KeyModifiers::CONTROL) => {
                Some(PopoverAction::Clear)
            }
            (KeyCode::Tab, _) => {
                draft.cycle_operator();
                Some(PopoverAction::Edited)
            }
            (KeyCode::Char('n'), modifiers) if modifiers.contains(KeyModifiers::CONTROL) => {
                draft.toggle_focus();
                Some(PopoverAction::Edited)
            }
            (KeyCode::Down, _) if draft.takes_text_input() => {
                draft.toggle_focus();
                Some(PopoverAction::Edited)
            }
            (KeyCode::Up, _) if draft.takes_text_input() => {
                draft.focus = DraftInput::First;
                Some(PopoverAction::Edited)
            }
            (KeyCode::Down, _) => {
                draft.move_cursor(1);
                Some(PopoverAction::Edited)
            }
            (KeyCode::Up, _) => {
                draft.move_cursor(-1);
                Some(PopoverAction::Edited)
            }
            (KeyCode::Backspace, _) => {
                draft.pop_char();
                Some(PopoverAction::Edited)
            }
            (KeyCode::Char(' '), _) if !draft.takes_text_input() => {
                draft.toggle_choice();
                Some(PopoverAction::Edited)
            }
            (KeyCode::Char(ch), modifiers)
                if !modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) =>
            {
                draft.push_char(ch);
                Some(PopoverAction::Edited)
            }
            _ => None,
        }
    }

    pub fn title(&self) -> String {
        format!("filter {}", self.header)
    }

    pub fn render_text(&self) -> String {
        let draft = &self.draft;
        let mut lines = vec![format!(
            "operator: {} (tab to change)",
            draft.operator().label()
        )];

        match draft.kind() {
            FilterKind::Text | FilterKind::Number | FilterKind::Date | FilterKind::DateRange => {
                let placeholder = draft.spec().placeholder.as_deref().unwrap_or("");
                lines.push(input_line(
                    "value",
                    &draft.input,
                    placeholder,
                    draft.focus == DraftInput::First,
                ));
                if draft.operator().takes_second_value() {
                    lines.push(input_line(
                        "and",
                        &draft.input2,
                        "",
                        draft.focus == DraftInput::Second,
                    ));
                }
            }
            FilterKind::Select | FilterKind::Multiselect => {
                for (index, option) in draft.spec().options.iter().enumerate() {
                    let pointer = if index == draft.cursor { ">" } else { " " };
                    let mark = if draft.is_chosen(index) { "[x]" } else { "[ ]" };
                    lines.push(format!("{pointer} {mark} {}", option.label));
                }
            }
            FilterKind::Boolean => {
                let mark = if draft.flag { "[x]" } else { "[ ]" };
                lines.push(format!("{mark} yes (space to flip)"));
            }
        }

        if let Some(hint) = draft.hint() {
            lines.push(String::new());
            lines.push(format!("! {hint}"));
        }
        lines.push(String::new());
        lines.push("enter apply | ctrl+d clear | esc cancel".to_owned());
        lines.join("\n")
    }
}

fn input_line(label: &str, value: &str, placeholder: &str, focused: bool) -> String {
    let cursor = if focused { "▏" } else { "" };
    if value.is_empty() && !placeholder.is_empty() {
        format!("{label}: {cursor}({placeholder})")
    } else {
        format!("{label}: {value}{cursor}")
    }
}

#[cfg(test)]
mod tests {
    use super::{FilterPopover, PopoverAction};
    use crmgrid_table::{
        CellValue, ColumnFilter, DraftInput, FilterDraft, FilterOption, FilterValue, Operator,
    };
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn type_text(popover: &mut FilterPopover, text: &str) {
        for ch in text.chars() {
            popover.handle_key(key(KeyCode::Char(ch)));
        }
    }

    fn popover_for(spec: &ColumnFilter) -> FilterPopover {
        FilterPopover::new("col", "Col", FilterDraft::new(spec, None))
    }

    #[test]
    fn typing_builds_a_text_filter() {
        let mut popover = popover_for(&ColumnFilter::text());
        type_text(&mut popover, "acme co");
        assert_eq!(
            popover.handle_key(key(KeyCode::Enter)),
            Some(PopoverAction::Apply)
        );
        assert_eq!(
            popover.filter(),
            Some(FilterValue::new(Operator::Contains, "acme co"))
        );
    }

    #[test]
    fn down_moves_to_second_bound_for_between() {
        let spec = ColumnFilter::number();
        let mut popover = popover_for(&spec);
        while popover.draft.operator() != Operator::Between {
            popover.handle_key(key(KeyCode::Tab));
        }
        type_text(&mut popover, "10");
        popover.handle_key(key(KeyCode::Down));
        assert_eq!(popover.draft.focus, DraftInput::Second);
        type_text(&mut popover, "20");
        assert_eq!(popover.filter(), Some(FilterValue::between(10.0, 20.0)));
        assert!(popover.render_text().contains("and: 20"));
    }

    #[test]
    fn arrows_and_space_pick_multiselect_options() {
        let spec = ColumnFilter::multiselect(vec![
            FilterOption::new("Open", "open"),
            FilterOption::new("Done", "done"),
            FilterOption::new("Lost", "lost"),
        ]);
        let mut popover = popover_for(&spec);
        popover.handle_key(key(KeyCode::Char(' ')));
        popover.handle_key(key(KeyCode::Down));
        popover.handle_key(key(KeyCode::Down));
        popover.handle_key(key(KeyCode::Char(' ')));

        let filter = popover.filter().expect("two options chosen");
        assert_eq!(filter.operator, Operator::In);
        assert_eq!(
            filter.value.as_many(),
            Some(&[CellValue::text("open"), CellValue::text("lost")][..])
        );
        assert!(popover.render_text().contains("> [x] Lost"));
    }

    #[test]
    fn control_keys_map_to_actions() {
        let mut popover = popover_for(&ColumnFilter::boolean());
        assert_eq!(
            popover.handle_key(KeyEvent::new(KeyCode::Char('d'), KeyModifiers::CONTROL)),
            Some(PopoverAction::Clear)
        );
        assert_eq!(
            popover.handle_key(key(KeyCode::Esc)),
            Some(PopoverAction::Cancel)
        );
        popover.handle_key(key(KeyCode::Char(' ')));
        assert_eq!(
            popover.filter(),
            Some(FilterValue::new(Operator::Equals, false))
        );
    }

    #[test]
    fn bad_number_shows_hint_but_still_applies() {
        let mut popover = popover_for(&ColumnFilter::number());
        type_text(&mut popover, "abc");
        assert!(popover.render_text().contains("! "));
        assert!(popover.filter().is_some());
    }
}
