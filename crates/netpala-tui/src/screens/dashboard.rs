//! The five boxed tables: Device, Station, VPN, Known Networks, New Networks.

use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::Style,
    text::Span,
    widgets::{Block, BorderType, Borders, Cell, Row, Table, TableState},
};

use netpala_core::Connectivity;

use crate::state::{BoxId, KnownRow, Model};
use crate::theme;
use crate::widgets::signal_bars::signal_span;

/// Visible network rows per network box; the VPN box takes two of them.
const NETS_HEIGHT: u16 = 10;
const NETS_HEIGHT_WITH_VPN: u16 = 8;
/// Borders plus the header row.
const CHROME: u16 = 3;

pub fn render(frame: &mut Frame, area: Rect, model: &Model) {
    let snapshot = &model.snapshot;
    let has_vpns = !snapshot.vpns().is_empty();
    let nets_height = if has_vpns {
        NETS_HEIGHT_WITH_VPN
    } else {
        NETS_HEIGHT
    };
    let device_height = rows_height(snapshot.devices().len());

    let mut constraints = vec![
        Constraint::Length(device_height),
        Constraint::Length(device_height),
    ];
    if has_vpns {
        constraints.push(Constraint::Length(rows_height(snapshot.vpns().len())));
    }
    constraints.push(Constraint::Length(nets_height + CHROME));
    constraints.push(Constraint::Min(CHROME + 1));
    let chunks = Layout::vertical(constraints).split(area);

    render_devices(frame, chunks[0], model);
    render_station(frame, chunks[1], model);
    let mut next = 2;
    if has_vpns {
        render_vpns(frame, chunks[next], model);
        next += 1;
    }
    render_known(frame, chunks[next], model);
    render_scanned(frame, chunks[next + 1], model);
}

fn rows_height(rows: usize) -> u16 {
    u16::try_from(rows.max(1))
        .unwrap_or(u16::MAX)
        .saturating_add(CHROME)
}

/// Frequency in MHz as a band label.
pub fn frequency_band(frequency: Option<u32>) -> String {
    match frequency {
        None => "-".to_owned(),
        Some(2400..2500) => "2.4 GHz".to_owned(),
        Some(5000..6000) => "5 GHz".to_owned(),
        Some(6000..7125) => "6 GHz".to_owned(),
        Some(mhz) => format!("{mhz} MHz"),
    }
}

fn yes_no(value: bool) -> &'static str {
    if value { "yes" } else { "no" }
}

fn boxed_table(
    frame: &mut Frame,
    area: Rect,
    model: &Model,
    id: BoxId,
    title: &str,
    columns: &[(&str, Constraint)],
    rows: Vec<Row<'_>>,
) {
    let focused = model.nav.selected_box == id;
    let block = Block::default()
        .title(format!(" {title} "))
        .title_style(theme::title_style())
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(if focused {
            theme::border_focused()
        } else {
            theme::border_default()
        });

    let header = Row::new(
        columns
            .iter()
            .map(|(label, _)| Cell::from(*label).style(theme::table_header())),
    );
    let widths: Vec<Constraint> = columns.iter().map(|(_, width)| *width).collect();

    let table = Table::new(rows, widths)
        .header(header)
        .block(block)
        .style(theme::table_row())
        .row_highlight_style(if focused {
            theme::table_selected()
        } else {
            Style::default()
        });

    let mut state = TableState::default();
    if focused {
        state.select(Some(model.nav.selected_entry));
    }
    frame.render_stateful_widget(table, area, &mut state);
}

fn render_devices(frame: &mut Frame, area: Rect, model: &Model) {
    let rows = model
        .snapshot
        .devices()
        .iter()
        .map(|d| {
            let powered = if d.powered {
                Span::styled("on", theme::state_ok())
            } else {
                Span::styled("off", theme::state_off())
            };
            Row::new(vec![
                Cell::from(d.name.clone()),
                Cell::from(d.mode.clone()),
                Cell::from(powered),
                Cell::from(d.address.clone()),
            ])
        })
        .collect();

    boxed_table(
        frame,
        area,
        model,
        BoxId::Device,
        "Device",
        &[
            ("Name", Constraint::Fill(1)),
            ("Mode", Constraint::Fill(1)),
            ("Powered", Constraint::Fill(1)),
            ("Address", Constraint::Fill(1)),
        ],
        rows,
    );
}

fn render_station(frame: &mut Frame, area: Rect, model: &Model) {
    let rows = model
        .snapshot
        .devices()
        .iter()
        .map(|d| {
            let style = match d.connectivity {
                Connectivity::Connected => theme::state_ok(),
                Connectivity::Connecting => theme::state_busy(),
                Connectivity::Disconnected => theme::state_off(),
            };
            let scanning = if d.scanning {
                Span::styled("yes", theme::state_busy())
            } else {
                Span::raw("no")
            };
            Row::new(vec![
                Cell::from(Span::styled(d.connectivity.to_string(), style)),
                Cell::from(scanning),
                Cell::from(frequency_band(d.frequency)),
                Cell::from(d.security.clone()),
            ])
        })
        .collect();

    boxed_table(
        frame,
        area,
        model,
        BoxId::Station,
        "Station",
        &[
            ("State", Constraint::Fill(1)),
            ("Scanning", Constraint::Fill(1)),
            ("Frequency", Constraint::Fill(1)),
            ("Security", Constraint::Fill(1)),
        ],
        rows,
    );
}

fn render_vpns(frame: &mut Frame, area: Rect, model: &Model) {
    let rows = model
        .snapshot
        .vpns()
        .iter()
        .map(|v| {
            let marker = if v.connected {
                Span::styled(">", theme::state_ok())
            } else {
                Span::raw("")
            };
            Row::new(vec![
                Cell::from(marker),
                Cell::from(v.name.clone()),
                Cell::from(v.kind.clone()),
            ])
        })
        .collect();

    boxed_table(
        frame,
        area,
        model,
        BoxId::Vpn,
        "VPN",
        &[
            ("", Constraint::Length(3)),
            ("Name", Constraint::Fill(2)),
            ("Type", Constraint::Fill(1)),
        ],
        rows,
    );
}

fn render_known(frame: &mut Frame, area: Rect, model: &Model) {
    let rows = model
        .snapshot
        .known_rows()
        .map(|row| match row {
            KnownRow::Saved(k) => {
                let marker = if k.connected {
                    Span::styled(">", theme::state_ok())
                } else {
                    Span::raw("")
                };
                Row::new(vec![
                    Cell::from(marker),
                    Cell::from(k.ssid.clone()),
                    Cell::from(k.security.clone()),
                    Cell::from(yes_no(k.hidden)),
                    Cell::from(yes_no(k.autoconnect)),
                    Cell::from(signal_span(k.signal)),
                ])
            }
            KnownRow::Pending(p) => Row::new(vec![
                Cell::from("~"),
                Cell::from(p.ssid.clone()),
                Cell::from(p.security.clone()),
                Cell::from("-"),
                Cell::from("-"),
                Cell::from("saving"),
            ])
            .style(theme::table_pending()),
        })
        .collect();

    boxed_table(
        frame,
        area,
        model,
        BoxId::Known,
        "Known Networks",
        &[
            ("", Constraint::Length(3)),
            ("Name", Constraint::Fill(3)),
            ("Security", Constraint::Length(23)),
            ("Hidden", Constraint::Length(7)),
            ("Auto Connect", Constraint::Length(13)),
            ("Signal", Constraint::Length(10)),
        ],
        rows,
    );
}

fn render_scanned(frame: &mut Frame, area: Rect, model: &Model) {
    let rows = model
        .snapshot
        .scanned()
        .iter()
        .map(|s| {
            Row::new(vec![
                Cell::from(s.ssid.clone()),
                Cell::from(s.security.clone()),
                Cell::from(signal_span(s.signal)),
            ])
        })
        .collect();

    boxed_table(
        frame,
        area,
        model,
        BoxId::Scanned,
        "New Networks",
        &[
            ("Name", Constraint::Fill(3)),
            ("Security", Constraint::Fill(2)),
            ("Signal", Constraint::Length(10)),
        ],
        rows,
    );
}
