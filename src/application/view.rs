use crate::application::{DatePicker, Element, EventKind, Handler, Msg, Node, Settings};
use crate::domain::{
    YearContext, add_dows, date_tuple, new_year, next_month, prepare_dates, prev_month, year_range,
};
use chrono::{Datelike, Month, NaiveDate};

/// Text shown in the input: what the user is typing, else the formatted
/// selection, else nothing.
pub fn input_value(selected: Option<NaiveDate>, settings: &Settings, picker: &DatePicker) -> String {
    picker
        .input_text()
        .map(str::to_string)
        .or_else(|| selected.map(|date| settings.format_date(date)))
        .unwrap_or_default()
}

pub fn render(selected: Option<NaiveDate>, settings: &Settings, picker: &DatePicker) -> Node {
    let mut input = Element::new("input")
        .class_list([(settings.class("input"), true)])
        .class_list(settings.input_class_list.iter().cloned())
        .attr("name", settings.input_name.clone().unwrap_or_default())
        .attr("type", "text")
        .on(EventKind::Change, Handler::Send(Msg::TextCommitted))
        .on(EventKind::Input, Handler::map(|text| Some(Msg::TextEdited(text.to_string()))))
        .on(EventKind::Blur, Handler::Send(Msg::InputBlurred))
        .on(EventKind::Click, Handler::Send(Msg::InputFocused))
        .on(EventKind::Focus, Handler::Send(Msg::InputFocused));

    for (name, value) in &settings.input_attributes {
        input = input.attr(name.clone(), value.clone());
    }
    if let Some(id) = &settings.input_id {
        input = input.attr("id", id.clone());
    }
    let input = input
        .attr("placeholder", settings.placeholder.clone())
        .attr("value", input_value(selected, settings, picker));

    let popup = if picker.is_open() {
        render_picker(selected, settings, picker)
    } else {
        Node::empty()
    };

    Element::new("div")
        .class_list([(settings.class("container"), true)])
        .class_list(settings.container_class_list.iter().cloned())
        .child(input)
        .child(popup)
        .into()
}

fn render_picker(selected: Option<NaiveDate>, settings: &Settings, picker: &DatePicker) -> Node {
    let current = picker.current_date(selected);
    let grid = prepare_dates(current, settings.first_day_of_week);
    let today = picker.today();

    let arrow = |name: &str, target: NaiveDate| -> Node {
        Element::new("a")
            .class(settings.class(name))
            .attr("href", "javascript:;")
            .attr("tabindex", "-1")
            .on(EventKind::Click, Handler::Send(Msg::FocusChanged(target)))
            .into()
    };

    let month_name = Month::try_from(grid.current_month.month() as u8)
        .map(|month| (settings.month_formatter)(month))
        .unwrap_or_default();

    let year: Node = if settings.change_year.is_active() {
        render_year_dropdown(settings, current, YearContext {
            current_month: grid.current_month,
            today,
        })
    } else {
        Node::text((settings.year_formatter)(grid.current_month.year()))
    };

    let header = Element::new("div")
        .class(settings.class("picker-header"))
        .child(
            Element::new("div")
                .class(settings.class("prev-container"))
                .child(arrow("prev", prev_month(current))),
        )
        .child(
            Element::new("div")
                .class(settings.class("month-container"))
                .child(
                    Element::new("span")
                        .class(settings.class("month"))
                        .child(Node::text(month_name)),
                )
                .child(Element::new("span").class(settings.class("year")).child(year)),
        )
        .child(
            Element::new("div")
                .class(settings.class("next-container"))
                .child(arrow("next", next_month(current))),
        );

    let weekdays = Element::new("thead").class(settings.class("weekdays")).child(
        Element::new("tr").children((0..7).map(|offset| {
            Element::new("td")
                .class(settings.class("dow"))
                .child(Node::text((settings.day_formatter)(add_dows(
                    offset,
                    settings.first_day_of_week,
                ))))
                .into()
        })),
    );

    let is_picked = |date: NaiveDate| selected.map(date_tuple) == Some(date_tuple(date));

    let body = Element::new("tbody").children(grid.weeks.iter().map(|week| {
        Element::new("tr")
            .children(week.iter().map(|&date| {
                let disabled = settings.disabled(date);
                let mut cell = Element::new("td").class_list([
                    (settings.class("day"), true),
                    (settings.class("disabled"), disabled),
                    (settings.class("picked"), is_picked(date)),
                    (settings.class("today"), date_tuple(date) == date_tuple(today)),
                    (settings.class("other-month"), !grid.is_current_month(date)),
                ]);
                if !disabled {
                    cell = cell.on(EventKind::Click, Handler::Send(Msg::Picked(Some(date))));
                }
                cell.child((settings.cell_formatter)(&date.day().to_string()))
                    .into()
            }))
            .into()
    }));

    Element::new("div")
        .class(settings.class("picker"))
        .on(EventKind::MouseDown, Handler::Send(Msg::PointerDown))
        .on(EventKind::MouseUp, Handler::Send(Msg::PointerUp))
        .child(header)
        .child(
            Element::new("table")
                .class(settings.class("table"))
                .child(weekdays)
                .child(body),
        )
        .into()
}

fn render_year_dropdown(settings: &Settings, current: NaiveDate, context: YearContext) -> Node {
    let shown_year = context.current_month.year();
    let options = year_range(context, settings.change_year)
        .into_iter()
        .map(|year| {
            let mut option = Element::new("option").attr("value", year.to_string());
            if year == shown_year {
                option = option.attr("selected", "selected");
            }
            option.child(Node::text((settings.year_formatter)(year))).into()
        });

    Element::new("select")
        .on(
            EventKind::Change,
            Handler::map(move |text| new_year(current, text).ok().map(Msg::FocusChanged)),
        )
        .children(options)
        .into()
}
