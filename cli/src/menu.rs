//! Interactive text menu over the reservation core.
//!
//! Thin I/O layer: every expected failure prints its message and drops
//! back to the menu. Only broken stdin/stdout ends the loop with an error.

use std::io::{self, BufRead, Write};
use std::rc::Rc;

use anyhow::Result;
use log::error;

use court_reservation_backend::{
    generate_report, NotificationSink, Reservation, ReservationRegistry,
};

/// Routes the core's status notices straight to the console.
struct ConsoleNotifier;

impl NotificationSink for ConsoleNotifier {
    fn notify(&self, line: &str) {
        println!("{}", line);
    }
}

pub fn run() -> Result<()> {
    let mut registry = ReservationRegistry::with_notifier(Rc::new(ConsoleNotifier));

    // Seed a few courts so the menu has something to offer.
    for (court_id, rate) in [("A", 20.0), ("B", 25.0), ("C", 30.0)] {
        if let Err(e) = registry.add_court(court_id, rate) {
            error!("Error initializing court {}: {}", court_id, e);
            println!("Error initializing courts: {}", e);
        }
    }

    loop {
        println!("\n===== BADMINTON COURT RESERVATION SYSTEM =====");
        println!("1. View Available Courts");
        println!("2. Make a Reservation");
        println!("3. Cancel a Reservation");
        println!("4. View My Reservations");
        println!("5. Generate Report");
        println!("6. Exit");

        let choice = match prompt("\nEnter your choice (1-6): ")? {
            Some(choice) => choice,
            None => break,
        };

        match choice.as_str() {
            "1" => view_courts(&registry),
            "2" => make_reservation(&mut registry)?,
            "3" => cancel_reservation(&mut registry)?,
            "4" => view_my_reservations(&registry)?,
            "5" => print_report(&registry),
            "6" => break,
            _ => println!("Invalid choice. Please enter a number between 1 and 6."),
        }
    }

    println!("\nThank you for using the system!");
    Ok(())
}

/// Read one trimmed line; `None` means stdin is closed.
fn prompt(message: &str) -> Result<Option<String>> {
    print!("{}", message);
    io::stdout().flush()?;

    let mut line = String::new();
    if io::stdin().lock().read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}

fn view_courts(registry: &ReservationRegistry) {
    println!("\n----- AVAILABLE COURTS -----");
    if registry.court_count() == 0 {
        println!("No courts available in the system.");
        return;
    }

    let mut courts: Vec<_> = registry.courts().collect();
    courts.sort_by(|a, b| a.borrow().court_id.cmp(&b.borrow().court_id));
    for court in courts {
        let court = court.borrow();
        println!("Court {}: ${:.2} per hour", court.court_id, court.hourly_rate);
    }
}

fn make_reservation(registry: &mut ReservationRegistry) -> Result<()> {
    println!("\n----- MAKE A RESERVATION -----");

    let player_name = match prompt("Enter your name: ")? {
        Some(name) => name,
        None => return Ok(()),
    };
    if player_name.is_empty() {
        println!("Name cannot be empty");
        return Ok(());
    }

    view_courts(registry);
    let court_id = match prompt("Enter court ID from the list above: ")? {
        Some(id) => id,
        None => return Ok(()),
    };
    if registry.court(&court_id).is_none() {
        println!("Court {} does not exist.", court_id);
        return Ok(());
    }

    let date = match prompt("Enter date (YYYY-MM-DD): ")? {
        Some(date) => date,
        None => return Ok(()),
    };

    let available = match registry.available_time_slots(&court_id, &date) {
        Ok(slots) => slots,
        Err(e) => {
            println!("Reservation failed: {}", e);
            return Ok(());
        }
    };
    if available.is_empty() {
        println!("No available time slots for court {} on {}", court_id, date);
        return Ok(());
    }

    println!("\nAvailable time slots:");
    for (index, slot) in available.iter().enumerate() {
        println!("{}. {}", index + 1, slot);
    }

    let selection = match prompt(&format!(
        "Select time slot number (1-{}): ",
        available.len()
    ))? {
        Some(selection) => selection,
        None => return Ok(()),
    };
    let time_slot = match selection.parse::<usize>() {
        Ok(n) if (1..=available.len()).contains(&n) => available[n - 1].clone(),
        _ => {
            println!(
                "Invalid selection. Please enter a number between 1 and {}",
                available.len()
            );
            return Ok(());
        }
    };

    let reservation_id = registry.mint_reservation_id();
    let reservation = match registry.make_reservation(
        &reservation_id,
        &player_name,
        &court_id,
        &date,
        &time_slot,
    ) {
        Ok(reservation) => reservation,
        Err(e) => {
            println!("Reservation failed: {}", e);
            return Ok(());
        }
    };

    println!("\n----- PAYMENT -----");
    println!("Total amount: ${:.2}", reservation.total_cost);
    println!("Valid payment methods: credit, cash, online");

    let payment_method = match prompt("Enter payment method (credit/cash/online): ")? {
        Some(method) => method.to_lowercase(),
        None => return Ok(()),
    };

    match registry.process_payment(&reservation_id, &payment_method) {
        Ok(_) => {
            println!(
                "\nReservation confirmed! Your reservation ID is {}",
                reservation_id
            );
            println!("Court {} reserved for {} at {}", court_id, date, time_slot);
        }
        Err(e) => println!("Reservation failed: {}", e),
    }
    Ok(())
}

fn cancel_reservation(registry: &mut ReservationRegistry) -> Result<()> {
    println!("\n----- CANCEL A RESERVATION -----");

    if registry.reservation_count() == 0 {
        println!("No reservations exist in the system.");
        return Ok(());
    }

    println!("Existing reservations:");
    for reservation in sorted_reservations(registry) {
        println!(
            "ID: {}, Player: {}, Court: {}, Date: {}, Time: {}",
            reservation.reservation_id,
            reservation.player_name,
            reservation.court.borrow().court_id,
            reservation.date,
            reservation.time_slot
        );
    }

    let reservation_id = match prompt("Enter reservation ID from the list above: ")? {
        Some(id) => id,
        None => return Ok(()),
    };

    match registry.cancel_reservation(&reservation_id) {
        Ok(_) => println!("Reservation {} cancelled successfully", reservation_id),
        Err(e) => println!("Cancellation failed: {}", e),
    }
    Ok(())
}

fn view_my_reservations(registry: &ReservationRegistry) -> Result<()> {
    println!("\n----- MY RESERVATIONS -----");

    let player_name = match prompt("Enter your name: ")? {
        Some(name) => name,
        None => return Ok(()),
    };

    let mut found = registry.reservations_for_player(&player_name);
    if found.is_empty() {
        println!("No reservations found for this name.");
        return Ok(());
    }

    found.sort_by(|a, b| a.reservation_id.cmp(&b.reservation_id));
    for reservation in found {
        println!(
            "ID: {}, Court: {}, Date: {}, Time: {}, Status: {}",
            reservation.reservation_id,
            reservation.court.borrow().court_id,
            reservation.date,
            reservation.time_slot,
            reservation.status.to_string()
        );
    }
    Ok(())
}

fn print_report(registry: &ReservationRegistry) {
    println!("\n----- SYSTEM REPORT -----");

    match generate_report(registry) {
        Ok(report) => {
            println!("Date: {}", report.generated_at.format("%Y-%m-%d"));
            println!("Total courts: {}", report.total_courts);
            println!("Total reservations: {}", report.total_reservations);
            println!("Confirmed reservations: {}", report.confirmed_reservations);
            println!("Total revenue: ${:.2}", report.total_revenue);
        }
        Err(e) => println!("Report generation failed: {}", e),
    }
}

fn sorted_reservations(registry: &ReservationRegistry) -> Vec<&Reservation> {
    let mut reservations: Vec<&Reservation> = registry.reservations().collect();
    reservations.sort_by(|a, b| a.reservation_id.cmp(&b.reservation_id));
    reservations
}
