use ptp::prelude::*;

// ---------------------------------------------------------------------------
// Output
// ---------------------------------------------------------------------------

fn camp_line(camp: &Camp) -> String {
    let mut tags = Vec::new();
    if camp.bestseller {
        tags.push("bestseller");
    }
    if camp.almost_full {
        tags.push("almost full");
    }
    let tags = if tags.is_empty() {
        String::new()
    } else {
        format!(" [{}]", tags.join(", "))
    };
    format!("{} | {} | {} {}{}", camp.name, camp.price, camp.date, camp.location, tags)
}

fn session_line(session: &Session) -> String {
    let kind = match session.kind {
        SessionKind::Camp => "camp",
        SessionKind::Clinic => "clinic",
    };
    format!(
        "{} ({kind}) {} {} @ {}",
        session.name, session.date, session.time, session.location
    )
}

fn print_error(what: &str, error: Option<String>) {
    if let Some(message) = error {
        eprintln!("could not load {what}: {message}");
    }
}

// ---------------------------------------------------------------------------
// Main
// ---------------------------------------------------------------------------

#[tokio::main]
async fn main() -> Result<(), PtpError> {
    ptp::logging::init();

    let app = AppContext::builder().config(ClientConfig::from_env()).build()?;
    app.initialize().await;

    if !app.auth().is_authenticated() {
        match (std::env::var("PTP_USERNAME"), std::env::var("PTP_PASSWORD")) {
            (Ok(username), Ok(password)) => {
                let user = app.auth().login(&LoginCredentials::new(username, password)).await?;
                println!("signed in as {} <{}>", user.name, user.email);
            }
            _ => {
                app.auth().continue_as_guest()?;
                println!("browsing as guest");
            }
        }
    } else if let Some(user) = app.auth().user() {
        println!("welcome back, {}", user.name);
    }

    let camps = app.camps();
    camps.mount().await;
    println!("\n== Camps ({}) ==", camps.camps().len());
    for camp in camps.camps() {
        println!("  {}", camp_line(&camp));
    }
    print_error("camps", camps.error());

    let trainers = app.trainers();
    trainers.mount().await;
    println!("\n== Trainers ({}) ==", trainers.trainers().len());
    for trainer in trainers.trainers() {
        println!("  {} ({}) {:.1}", trainer.name, trainer.college, trainer.rating);
    }
    print_error("trainers", trainers.error());

    if app.auth().is_authenticated() {
        let sessions = app.sessions();
        sessions.mount().await;
        let split = sessions.partition();
        println!("\n== Upcoming ({}) ==", split.upcoming.len());
        for session in &split.upcoming {
            println!("  {}", session_line(session));
        }
        println!("\n== Past ({}) ==", split.past.len());
        for session in &split.past {
            println!("  {}", session_line(session));
        }
        print_error("sessions", sessions.error());

        if !app.auth().is_authenticated() {
            tracing::warn!("session expired while loading; signed out");
        }
    }

    app.shutdown();
    Ok(())
}
