//! Interactive kiosk driving the full check-in flow in a terminal.

use crate::output;
use crate::platform::{StaticSensor, TerminalScanner, TextCodeRenderer};
use rollcall_flow::{CheckinFlow, CodeRenderer, FlowState, ScanTicket};
use std::io::{self, BufRead, Write};

pub fn run(
    latitude: Option<f64>,
    longitude: Option<f64>,
    accuracy: f64,
) -> Result<(), Box<dyn std::error::Error>> {
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    let mut flow = CheckinFlow::new();
    let mut sensor = StaticSensor::new(latitude, longitude, accuracy);
    let mut scanner = TerminalScanner::new();
    let renderer = TextCodeRenderer;
    let mut scan_ticket: Option<ScanTicket> = None;

    println!("rollcall kiosk");
    loop {
        prompt(&flow)?;
        let Some(line) = lines.next() else {
            break;
        };
        let line = line?;
        let input = line.trim();
        if input.is_empty() {
            continue;
        }

        match flow.state() {
            FlowState::Home => match input {
                "admin" => flow.open_admin(),
                "student" => flow.open_student(),
                "records" => print_records(&flow),
                "quit" => break,
                _ => println!("commands: admin, student, records, quit"),
            },
            FlowState::AdminAwaitingLocation => {
                if input == "sensor" {
                    if let Err(e) = flow.read_sensor(&mut sensor) {
                        println!("! {}", e);
                    }
                    print_session_if_open(&flow, &renderer);
                } else if let Some(addr) = input.strip_prefix("address ") {
                    if let Err(e) = flow.submit_manual_address(addr) {
                        println!("! {}", e);
                    }
                    print_session_if_open(&flow, &renderer);
                } else if input == "back" {
                    flow.go_home();
                } else {
                    println!("commands: sensor, address <addr>, back");
                }
            }
            FlowState::AdminSessionOpen => match input {
                "new" => flow.new_code(),
                "records" => print_records(&flow),
                "back" => flow.go_home(),
                _ => println!("commands: new, records, back"),
            },
            FlowState::StudentAwaitingName => match input {
                "back" => flow.go_home(),
                name => {
                    flow.set_student_name(name);
                    scan_ticket = flow.start_scanning(&mut scanner);
                    match scan_ticket {
                        Some(_) => println!("scanner active - paste a payload"),
                        None => {
                            if let Some(e) = flow.last_error() {
                                println!("! {}", e);
                            }
                        }
                    }
                }
            },
            FlowState::StudentScanning => match input {
                "back" => {
                    flow.go_home();
                    scan_ticket = None;
                }
                payload => {
                    let Some(ticket) = scan_ticket else {
                        continue;
                    };
                    match flow.scan_decoded(ticket, payload) {
                        Ok(()) if flow.state() == FlowState::StudentRedeemed => {
                            scan_ticket = None;
                            print_redemption(&flow);
                        }
                        Ok(()) => {}
                        Err(e) => println!("! {} - try again", e),
                    }
                }
            },
            FlowState::StudentRedeemed => match input {
                "another" => flow.scan_another(),
                "back" => flow.go_home(),
                _ => println!("commands: another, back"),
            },
        }
    }

    Ok(())
}

fn prompt(flow: &CheckinFlow) -> io::Result<()> {
    let tag = match flow.state() {
        FlowState::Home => "home",
        FlowState::AdminAwaitingLocation => "admin/location",
        FlowState::AdminSessionOpen => "admin/session",
        FlowState::StudentAwaitingName => "student/name",
        FlowState::StudentScanning => "student/scan",
        FlowState::StudentRedeemed => "student/done",
    };
    print!("[{}]> ", tag);
    io::stdout().flush()
}

fn print_session_if_open(flow: &CheckinFlow, renderer: &TextCodeRenderer) {
    let Some(session) = flow.session() else {
        return;
    };
    println!("{}", renderer.render(&session.transport));
    println!("{}", output::token_summary(&session.token));
    println!("payload:   {}", session.transport);
    if !flow.ledger().is_empty() {
        println!("attendance so far: {}", flow.ledger().count());
    }
}

fn print_records(flow: &CheckinFlow) {
    if flow.ledger().is_empty() {
        println!("no attendance recorded yet");
        return;
    }
    output::print_record_header();
    for record in flow.ledger().iter() {
        println!("{}", output::record_row(record));
    }
    println!("total: {}", flow.ledger().count());
}

fn print_redemption(flow: &CheckinFlow) {
    let Some(record) = flow.last_redemption() else {
        return;
    };
    println!("attendance marked");
    println!("student:   {}", record.student_name());
    println!("session:   {}", record.session_id());
    println!("location:\n{}", output::claim_summary(record.redeemed_claim()));
    println!("type 'another' for the next student, 'back' for the menu");
}
