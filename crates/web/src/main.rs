use rulotto_core::{Event, EventBus, PlayerView, Round, StateSnapshot};
use rulotto_data::load_game_config_or_default;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use std::sync::{Arc, Mutex};
use tiny_http::{Header, Method, Response, Server, StatusCode};

fn main() {
    let addr = std::env::var("RULOTTO_ADDR").unwrap_or_else(|_| "0.0.0.0:7878".to_string());
    let server = Server::http(&addr).expect("start server");
    println!("Rulotto web server on http://{addr}");
    let state = Arc::new(Mutex::new(AppState::new()));
    for request in server.incoming_requests() {
        let state = state.clone();
        if let Err(err) = handle_request(request, state) {
            eprintln!("request error: {err}");
        }
    }
}

struct AppState {
    round: Round,
    events: EventBus,
}

impl AppState {
    fn new() -> Self {
        let config = load_game_config_or_default(Path::new("assets")).expect("load config");
        Self::with_round(Round::from_entropy(config))
    }

    fn with_round(round: Round) -> Self {
        Self {
            round,
            events: EventBus::default(),
        }
    }
}

#[derive(Serialize)]
struct ApiResponse {
    ok: bool,
    error: Option<String>,
    state: StateSnapshot,
    events: Vec<Event>,
    ranking: Option<Vec<PlayerView>>,
}

#[derive(Deserialize)]
struct PlayerRequest {
    name: String,
    chosen_numbers: String,
    chosen_stars: String,
}

#[derive(Deserialize)]
struct GenerateRequest {
    count: usize,
}

#[derive(Deserialize)]
struct PrizeRequest {
    amount: String,
}

fn handle_request(
    mut request: tiny_http::Request,
    state: Arc<Mutex<AppState>>,
) -> Result<(), Box<dyn std::error::Error>> {
    let url = request.url().to_string();
    let method = request.method().clone();
    let mut body = String::new();
    if method == Method::Post {
        request.as_reader().read_to_string(&mut body)?;
    }
    match (method, url.as_str()) {
        (Method::Get, "/") => {
            let guard = state.lock().unwrap();
            respond_html(request, render_home(&guard, None))
        }
        (Method::Get, "/play") => {
            let guard = state.lock().unwrap();
            respond_html(request, render_play(&guard, None))
        }
        (Method::Get, "/ranking") => {
            let guard = state.lock().unwrap();
            respond_html(request, render_ranking(&guard, None))
        }
        (Method::Get, "/rules") => {
            let guard = state.lock().unwrap();
            respond_html(request, render_rules(&guard))
        }
        (Method::Post, "/players") => {
            let form = parse_form(&body);
            let mut guard = state.lock().unwrap();
            let app = &mut *guard;
            let flash = submit_player_form(app, &form);
            respond_html(request, render_play(app, Some(&flash)))
        }
        (Method::Post, "/players/generate") => {
            let form = parse_form(&body);
            let mut guard = state.lock().unwrap();
            let app = &mut *guard;
            let flash = generate_players_form(app, &form);
            respond_html(request, render_home(app, Some(&flash)))
        }
        (Method::Post, "/players/delete") => {
            let mut guard = state.lock().unwrap();
            let app = &mut *guard;
            let flash = delete_players_form(app);
            respond_html(request, render_home(app, Some(&flash)))
        }
        (Method::Post, "/prize") => {
            let form = parse_form(&body);
            let mut guard = state.lock().unwrap();
            let app = &mut *guard;
            let flash = update_prize_form(app, &form);
            respond_html(request, render_home(app, Some(&flash)))
        }
        (Method::Post, "/draw") => {
            let mut guard = state.lock().unwrap();
            let app = &mut *guard;
            let flash = run_draw_form(app);
            respond_html(request, render_home(app, Some(&flash)))
        }
        (Method::Get, "/api/state") | (Method::Get, "/api/players") => {
            let mut guard = state.lock().unwrap();
            let response = api_envelope(&mut guard, None);
            respond_json(request, response)
        }
        (Method::Get, "/api/ranking") => {
            let mut guard = state.lock().unwrap();
            let app = &mut *guard;
            let mut response = api_envelope(app, None);
            response.ranking = Some(app.round.ranking());
            respond_json(request, response)
        }
        (Method::Post, "/api/players") => {
            let req: PlayerRequest = serde_json::from_str(&body)?;
            let mut guard = state.lock().unwrap();
            let app = &mut *guard;
            let error = app
                .round
                .register_player(
                    &req.name,
                    &req.chosen_numbers,
                    &req.chosen_stars,
                    &mut app.events,
                )
                .err()
                .map(|err| err.to_string());
            let response = api_envelope(app, error);
            respond_json(request, response)
        }
        (Method::Post, "/api/players/generate") => {
            let req: GenerateRequest = serde_json::from_str(&body)?;
            let mut guard = state.lock().unwrap();
            let app = &mut *guard;
            let error = app
                .round
                .generate_players(req.count, &mut app.events)
                .err()
                .map(|err| err.to_string());
            let response = api_envelope(app, error);
            respond_json(request, response)
        }
        (Method::Post, "/api/players/delete") => {
            let mut guard = state.lock().unwrap();
            let app = &mut *guard;
            app.round.clear_players(&mut app.events);
            let response = api_envelope(app, None);
            respond_json(request, response)
        }
        (Method::Post, "/api/draw") => {
            let mut guard = state.lock().unwrap();
            let app = &mut *guard;
            app.round.run_draw(&mut app.events);
            let response = api_envelope(app, None);
            respond_json(request, response)
        }
        (Method::Post, "/api/prize") => {
            let req: PrizeRequest = serde_json::from_str(&body)?;
            let mut guard = state.lock().unwrap();
            let app = &mut *guard;
            let error = app
                .round
                .set_prize(&req.amount, &mut app.events)
                .err()
                .map(|err| err.to_string());
            let response = api_envelope(app, error);
            respond_json(request, response)
        }
        _ => {
            let response = Response::empty(StatusCode(404));
            request.respond(response)?;
            Ok(())
        }
    }
}

fn respond_html(
    request: tiny_http::Request,
    markup: String,
) -> Result<(), Box<dyn std::error::Error>> {
    let header = Header::from_bytes(&b"Content-Type"[..], &b"text/html; charset=utf-8"[..])
        .map_err(|_| "invalid content-type header")?;
    request.respond(Response::from_string(markup).with_header(header))?;
    Ok(())
}

fn respond_json(
    request: tiny_http::Request,
    response: ApiResponse,
) -> Result<(), Box<dyn std::error::Error>> {
    let body = serde_json::to_vec_pretty(&response)?;
    let header = Header::from_bytes(&b"Content-Type"[..], &b"application/json"[..])
        .map_err(|_| "invalid content-type header")?;
    request.respond(Response::from_data(body).with_header(header))?;
    Ok(())
}

fn api_envelope(app: &mut AppState, error: Option<String>) -> ApiResponse {
    let events: Vec<_> = app.events.drain().collect();
    ApiResponse {
        ok: error.is_none(),
        error,
        state: app.round.snapshot(),
        events,
        ranking: None,
    }
}

struct Flash {
    ok: bool,
    text: String,
}

impl Flash {
    fn success(text: String) -> Self {
        Self { ok: true, text }
    }

    fn error(text: String) -> Self {
        Self { ok: false, text }
    }
}

fn field<'a>(form: &'a HashMap<String, String>, key: &str) -> &'a str {
    form.get(key).map(String::as_str).unwrap_or("")
}

// The page banner already tells the story on browser routes; queued events
// only go out over the API envelope.
fn submit_player_form(app: &mut AppState, form: &HashMap<String, String>) -> Flash {
    let name = field(form, "name");
    let result = app.round.register_player(
        name,
        field(form, "chosen_numbers"),
        field(form, "chosen_stars"),
        &mut app.events,
    );
    app.events.drain().for_each(drop);
    match result {
        Ok(()) => Flash::success(format!("Player {name} joined the round.")),
        Err(err) => Flash::error(err.to_string()),
    }
}

fn generate_players_form(app: &mut AppState, form: &HashMap<String, String>) -> Flash {
    let Ok(count) = field(form, "count").trim().parse::<usize>() else {
        return Flash::error("Please enter a valid number of players.".to_string());
    };
    let result = app.round.generate_players(count, &mut app.events);
    app.events.drain().for_each(drop);
    match result {
        Ok(added) => Flash::success(format!("{added} players generated.")),
        Err(err) => Flash::error(err.to_string()),
    }
}

fn delete_players_form(app: &mut AppState) -> Flash {
    let removed = app.round.clear_players(&mut app.events);
    app.events.drain().for_each(drop);
    Flash::success(format!("{removed} players removed."))
}

fn update_prize_form(app: &mut AppState, form: &HashMap<String, String>) -> Flash {
    let result = app.round.set_prize(field(form, "amount"), &mut app.events);
    app.events.drain().for_each(drop);
    match result {
        Ok(amount) => Flash::success(format!("Prize pool set to {}.", format_euros(amount))),
        Err(err) => Flash::error(err.to_string()),
    }
}

fn run_draw_form(app: &mut AppState) -> Flash {
    let draw = app.round.run_draw(&mut app.events);
    app.events.drain().for_each(drop);
    Flash::success(format!(
        "Draw complete: numbers {} / stars {}",
        join_values(&draw.numbers),
        join_values(&draw.stars)
    ))
}

const STYLE: &str = "body{font-family:sans-serif;max-width:60rem;margin:1rem auto;padding:0 1rem}\
nav a{margin-right:1rem}table{border-collapse:collapse;margin:1rem 0}\
td,th{border:1px solid #999;padding:0.25rem 0.5rem}form{margin:0.5rem 0}\
.banner{padding:0.5rem;border:1px solid}.ok{background:#e6ffe6}.err{background:#ffe6e6}\
.prize{font-size:1.25rem;font-weight:bold}";

fn render_layout(title: &str, flash: Option<&Flash>, body: &str) -> String {
    let banner = match flash {
        Some(flash) => {
            let class = if flash.ok { "ok" } else { "err" };
            format!(
                "<p class=\"banner {class}\">{}</p>",
                escape_html(&flash.text)
            )
        }
        None => String::new(),
    };
    format!(
        "<!DOCTYPE html><html><head><meta charset=\"utf-8\">\
         <title>{title} - Rulotto</title><style>{STYLE}</style></head><body>\
         <nav><a href=\"/\">Lobby</a><a href=\"/play\">Play</a>\
         <a href=\"/ranking\">Ranking</a><a href=\"/rules\">Rules</a></nav>\
         {banner}{body}</body></html>"
    )
}

fn render_home(app: &AppState, flash: Option<&Flash>) -> String {
    let round = &app.round;
    let mut body = format!(
        "<h1>Rulotto lobby</h1><p class=\"prize\">Prize pool: {}</p>\
         <p>{} of {} spots remaining.</p>",
        format_euros(round.prize),
        round.roster.remaining_spots(),
        round.roster.cap()
    );
    if let Some(draw) = &round.draw {
        body.push_str(&format!(
            "<p>Last draw: numbers {} / stars {}</p>",
            join_values(&draw.numbers),
            join_values(&draw.stars)
        ));
    }
    if round.roster.is_empty() {
        body.push_str("<p>No players yet.</p>");
    } else {
        body.push_str("<table><tr><th>Name</th><th>Numbers</th><th>Stars</th><th>Gains</th></tr>");
        for player in round.roster.players() {
            let gains = match &player.score {
                Some(score) => format_euros(score.gains),
                None => "-".to_string(),
            };
            body.push_str(&format!(
                "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>",
                escape_html(&player.name),
                join_values(&player.numbers),
                join_values(&player.stars),
                gains
            ));
        }
        body.push_str("</table>");
    }
    body.push_str(
        "<form method=\"post\" action=\"/players/generate\">\
         <input name=\"count\" value=\"10\" size=\"4\"><button>Generate players</button></form>\
         <form method=\"post\" action=\"/draw\"><button>Run the draw</button></form>\
         <form method=\"post\" action=\"/prize\">\
         <input name=\"amount\" placeholder=\"3000000\" size=\"10\"><button>Set prize</button></form>\
         <form method=\"post\" action=\"/players/delete\"><button>Remove all players</button></form>",
    );
    render_layout("Lobby", flash, &body)
}

fn render_play(app: &AppState, flash: Option<&Flash>) -> String {
    let config = &app.round.config;
    let body = format!(
        "<h1>Join the round</h1>\
         <p>Pick exactly {} numbers between {} and {}, and {} stars between {} and {}.</p>\
         <p>{} spots left.</p>\
         <form method=\"post\" action=\"/players\">\
         <p><label>Name <input name=\"name\"></label></p>\
         <p><label>Numbers <input name=\"chosen_numbers\" placeholder=\"1,2,3,4,5\"></label></p>\
         <p><label>Stars <input name=\"chosen_stars\" placeholder=\"6,7\"></label></p>\
         <p><button>Join</button></p></form>",
        config.numbers.cap,
        config.numbers.min,
        config.numbers.max,
        config.stars.cap,
        config.stars.min,
        config.stars.max,
        app.round.roster.remaining_spots()
    );
    render_layout("Play", flash, &body)
}

fn render_ranking(app: &AppState, flash: Option<&Flash>) -> String {
    let ranking = app.round.ranking();
    let mut body = format!(
        "<h1>Ranking</h1><p class=\"prize\">Prize pool: {}</p>",
        format_euros(app.round.prize)
    );
    if let Some(draw) = &app.round.draw {
        body.push_str(&format!(
            "<p>Winning numbers {} / stars {}</p>",
            join_values(&draw.numbers),
            join_values(&draw.stars)
        ));
    } else {
        body.push_str("<p>No draw has run yet.</p>");
    }
    if ranking.is_empty() {
        body.push_str("<p>No players yet.</p>");
    } else {
        body.push_str(
            "<table><tr><th>#</th><th>Name</th><th>Numbers</th><th>Stars</th>\
             <th>Matched</th><th>Proximity</th><th>Gains</th></tr>",
        );
        for (index, row) in ranking.iter().enumerate() {
            let matched = if row.matched_numbers.is_empty() && row.matched_stars.is_empty() {
                "-".to_string()
            } else {
                format!(
                    "{} / {}",
                    join_values(&row.matched_numbers),
                    join_values(&row.matched_stars)
                )
            };
            body.push_str(&format!(
                "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td>\
                 <td>{} / {}</td><td>{}</td></tr>",
                index + 1,
                escape_html(&row.name),
                join_values(&row.numbers),
                join_values(&row.stars),
                matched,
                row.number_proximity,
                row.star_proximity,
                format_euros(row.gains)
            ));
        }
        body.push_str("</table>");
    }
    render_layout("Ranking", flash, &body)
}

fn render_rules(app: &AppState) -> String {
    let config = &app.round.config;
    let mut body = format!(
        "<h1>Rules</h1>\
         <p>Every entry picks exactly {} numbers between {} and {}, and {} stars \
         between {} and {}. The lobby seats at most {} players per round.</p>\
         <p>After the draw, entries rank by matched numbers, then matched stars, \
         then by how close their remaining picks came to the winning values. When \
         nobody matches anything, the entry whose numbers add up closest to the \
         drawn total takes the lead.</p>\
         <p>The prize pool splits over the top ranks:</p><ol>",
        config.numbers.cap,
        config.numbers.min,
        config.numbers.max,
        config.stars.cap,
        config.stars.min,
        config.stars.max,
        config.roster_cap
    );
    for share in &config.payout_percentages {
        body.push_str(&format!("<li>{share}%</li>"));
    }
    body.push_str(
        "</ol><p>With fewer players than ranks, the unreachable shares fold back \
         into the paid ranks; entries that tie on every criterion pool their \
         ranks' shares and split them evenly.</p>",
    );
    render_layout("Rules", None, &body)
}

fn join_values(values: &[u8]) -> String {
    let parts: Vec<String> = values.iter().map(|value| value.to_string()).collect();
    parts.join(", ")
}

fn format_euros(amount: f64) -> String {
    if amount.fract() == 0.0 {
        format!("{amount:.0} €")
    } else {
        format!("{amount:.2} €")
    }
}

fn escape_html(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

fn parse_form(body: &str) -> HashMap<String, String> {
    let mut fields = HashMap::new();
    for pair in body.split('&') {
        let Some((key, value)) = pair.split_once('=') else {
            continue;
        };
        fields.insert(decode_component(key), decode_component(value));
    }
    fields
}

fn decode_component(raw: &str) -> String {
    let bytes = raw.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut index = 0;
    while index < bytes.len() {
        match bytes[index] {
            b'+' => {
                out.push(b' ');
                index += 1;
            }
            b'%' if index + 2 < bytes.len() => {
                let hex = std::str::from_utf8(&bytes[index + 1..index + 3]).ok();
                match hex.and_then(|pair| u8::from_str_radix(pair, 16).ok()) {
                    Some(byte) => {
                        out.push(byte);
                        index += 3;
                    }
                    None => {
                        out.push(b'%');
                        index += 1;
                    }
                }
            }
            byte => {
                out.push(byte);
                index += 1;
            }
        }
    }
    String::from_utf8_lossy(&out).into_owned()
}
