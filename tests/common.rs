#![allow(dead_code)]
use assert_cmd::{Command, cargo_bin_cmd};
use async_trait::async_trait;
use axum::extract::{Path, Query, Request, State};
use axum::http::StatusCode;
use axum::http::header::AUTHORIZATION;
use axum::middleware::{self, Next};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post, put};
use axum::{Json, Router};
use chrono::{DateTime, Utc};
use emptrack::api::ClockApi;
use emptrack::errors::{AppError, AppResult};
use emptrack::models::clock::{BreakRecord, BreakType, ClockRecord};
use emptrack::session::Session;
use serde_json::{Value, json};
use std::collections::HashMap;
use std::env;
use std::fs;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

pub const GOOD_TOKEN: &str = "good-token";
pub const PASSWORD: &str = "secret";
pub const USER_ID: i64 = 7;

pub fn emp() -> Command {
    cargo_bin_cmd!("emptrack")
}

/// Create a unique test DB path inside the system temp dir and remove any existing file
pub fn setup_test_db(name: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_emptrack.sqlite", name));
    let db_path = path.to_string_lossy().to_string();
    fs::remove_file(&db_path).ok();
    db_path
}

/// Create a temporary output file path inside tempdir and ensure it's removed
pub fn temp_out(name: &str, ext: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_out.{}", name, ext));
    let p = path.to_string_lossy().to_string();
    fs::remove_file(&p).ok();
    p
}

/// Empty HOME directory so CLI runs never touch the real config.
pub fn temp_home(name: &str) -> PathBuf {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_emptrack_home", name));
    fs::remove_dir_all(&path).ok();
    fs::create_dir_all(&path).expect("create temp home");
    path
}

/// A base URL nothing listens on.
pub fn dead_api_url() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("bind");
    let addr = listener.local_addr().expect("addr");
    drop(listener);
    format!("http://{}/api/", addr)
}

pub fn session(is_admin: bool) -> Session {
    Session {
        token: GOOD_TOKEN.to_string(),
        user_id: USER_ID,
        username: "alice".to_string(),
        is_admin,
    }
}

// ------------------------------------------------
// In-process HTTP server
// ------------------------------------------------

#[derive(Debug, Clone)]
pub struct OpenRecord {
    pub id: i64,
    pub clock_in_time: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct OpenBreak {
    pub id: i64,
    pub record_id: i64,
    pub break_type: String,
    pub start_time: DateTime<Utc>,
    pub notes: String,
}

#[derive(Debug, Default)]
pub struct ServerState {
    next_id: i64,
    pub open_record: Option<OpenRecord>,
    pub closed_records: Vec<i64>,
    pub open_break: Option<OpenBreak>,
    pub ended_breaks: Vec<i64>,
    pub tasks: Vec<Value>,
    pub projects: Vec<Value>,
    pub employees: Vec<Value>,
    pub leave_requests: Vec<Value>,
    /// `"METHOD /path"` of every authenticated request, in order.
    pub requests: Vec<String>,
}

impl ServerState {
    fn seeded() -> Self {
        Self {
            next_id: 100,
            employees: vec![json!({
                "id": USER_ID,
                "first_name": "Alice",
                "last_name": "Doe",
                "email": "alice@example.com",
                "role": "Developer",
                "is_active": true
            })],
            projects: vec![json!({
                "id": 1,
                "name": "Apollo",
                "description": "Internal tooling",
                "start_date": "2026-01-01",
                "end_date": null
            })],
            tasks: vec![json!({
                "id": 1,
                "name": "Write docs",
                "description": "",
                "due_date": "2026-11-01",
                "status": "Pending",
                "assigned_to": USER_ID,
                "project_id": 1
            })],
            leave_requests: vec![json!({
                "id": 1,
                "employee_name": "Bob Stone",
                "employee_email": "bob@example.com",
                "leave_type": "SICK",
                "start_date": "2026-10-20",
                "end_date": "2026-10-21",
                "reason": "Flu",
                "status": "PENDING"
            })],
            ..Default::default()
        }
    }

    fn next_id(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }
}

type Shared = Arc<Mutex<ServerState>>;

pub struct FakeServer {
    pub base_url: String,
    pub state: Shared,
}

impl FakeServer {
    pub fn start() -> Self {
        let state: Shared = Arc::new(Mutex::new(ServerState::seeded()));

        let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("bind");
        listener.set_nonblocking(true).expect("nonblocking");
        let addr = listener.local_addr().expect("addr");
        let app = router(state.clone());

        std::thread::spawn(move || {
            let rt = tokio::runtime::Builder::new_multi_thread()
                .worker_threads(1)
                .enable_all()
                .build()
                .expect("runtime");
            rt.block_on(async move {
                let listener = tokio::net::TcpListener::from_std(listener).expect("listener");
                axum::serve(listener, app).await.expect("serve");
            });
        });

        Self {
            base_url: format!("http://{}/api/", addr),
            state,
        }
    }

    pub fn with_state<T>(&self, f: impl FnOnce(&mut ServerState) -> T) -> T {
        f(&mut self.state.lock().expect("state"))
    }

    pub fn requests(&self) -> Vec<String> {
        self.with_state(|s| s.requests.clone())
    }

    /// Pretend the user clocked in `secs_ago` seconds ago.
    pub fn open_record(&self, id: i64, secs_ago: i64) {
        self.with_state(|s| {
            s.open_record = Some(OpenRecord {
                id,
                clock_in_time: Utc::now() - chrono::Duration::seconds(secs_ago),
            })
        });
    }
}

fn error(status: StatusCode, msg: &str) -> Response {
    (status, Json(json!({ "error": msg }))).into_response()
}

async fn auth(State(s): State<Shared>, req: Request, next: Next) -> Response {
    let line = format!("{} {}", req.method(), req.uri().path());
    s.lock().expect("state").requests.push(line);

    let expected = format!("Bearer {}", GOOD_TOKEN);
    let header = req.headers().get(AUTHORIZATION).and_then(|v| v.to_str().ok());
    if header != Some(expected.as_str()) {
        return (
            StatusCode::UNAUTHORIZED,
            Json(json!({ "detail": "Invalid token." })),
        )
            .into_response();
    }
    next.run(req).await
}

async fn login(Json(body): Json<Value>) -> Response {
    let email = body["email"].as_str().unwrap_or_default().to_string();
    if body["password"].as_str() != Some(PASSWORD) {
        return (
            StatusCode::UNAUTHORIZED,
            Json(json!({ "detail": "Invalid credentials" })),
        )
            .into_response();
    }
    let username = email.split('@').next().unwrap_or_default();
    Json(json!({
        "token": GOOD_TOKEN,
        "user_id": USER_ID,
        "username": username,
        "is_admin": email.starts_with("admin"),
    }))
    .into_response()
}

fn record_json(r: &OpenRecord, clock_out: Option<DateTime<Utc>>) -> Value {
    json!({ "id": r.id, "clock_in_time": r.clock_in_time, "clock_out_time": clock_out })
}

fn break_json(b: &OpenBreak) -> Value {
    json!({
        "id": b.id,
        "break_type": b.break_type,
        "start_time": b.start_time,
        "notes": b.notes,
        "end_time": null
    })
}

async fn clock_in(State(s): State<Shared>) -> Response {
    let mut st = s.lock().expect("state");
    if st.open_record.is_some() {
        return error(StatusCode::BAD_REQUEST, "You are already clocked in.");
    }
    let record = OpenRecord {
        id: st.next_id(),
        clock_in_time: Utc::now(),
    };
    let body = record_json(&record, None);
    st.open_record = Some(record);
    (StatusCode::CREATED, Json(body)).into_response()
}

async fn clock_out(State(s): State<Shared>, Json(body): Json<Value>) -> Response {
    let mut st = s.lock().expect("state");
    let record_id = body["record_id"].as_i64();
    match st.open_record.clone() {
        Some(r) if Some(r.id) == record_id => {
            st.open_record = None;
            st.open_break = None;
            st.closed_records.push(r.id);
            Json(record_json(&r, Some(Utc::now()))).into_response()
        }
        _ => error(StatusCode::BAD_REQUEST, "No active clock-in record"),
    }
}

async fn take_break(State(s): State<Shared>, Json(body): Json<Value>) -> Response {
    let mut st = s.lock().expect("state");
    let record_id = body["record_id"].as_i64();
    if st.open_record.as_ref().map(|r| r.id) != record_id {
        return error(StatusCode::BAD_REQUEST, "No active clock-in record");
    }
    if st.open_break.is_some() {
        return error(StatusCode::BAD_REQUEST, "A break is already in progress");
    }
    let brk = OpenBreak {
        id: st.next_id(),
        record_id: record_id.unwrap_or_default(),
        break_type: body["break_type"].as_str().unwrap_or("tea").to_string(),
        start_time: Utc::now(),
        notes: body["notes"].as_str().unwrap_or_default().to_string(),
    };
    let json = break_json(&brk);
    st.open_break = Some(brk);
    (StatusCode::CREATED, Json(json)).into_response()
}

async fn end_break(State(s): State<Shared>, Json(body): Json<Value>) -> Response {
    let mut st = s.lock().expect("state");
    match st.open_break.clone() {
        Some(b) if Some(b.id) == body["break_id"].as_i64() => {
            st.open_break = None;
            st.ended_breaks.push(b.id);
            Json(json!({ "status": "ok" })).into_response()
        }
        _ => error(StatusCode::BAD_REQUEST, "No active break"),
    }
}

async fn active_clock_in(State(s): State<Shared>) -> Response {
    match &s.lock().expect("state").open_record {
        Some(r) => Json(record_json(r, None)).into_response(),
        None => error(StatusCode::NOT_FOUND, "No active clock-in"),
    }
}

async fn active_break(
    State(s): State<Shared>,
    Query(q): Query<HashMap<String, String>>,
) -> Response {
    let record_id: Option<i64> = q.get("record_id").and_then(|v| v.parse().ok());
    match &s.lock().expect("state").open_break {
        Some(b) if Some(b.record_id) == record_id => Json(break_json(b)).into_response(),
        _ => StatusCode::NO_CONTENT.into_response(),
    }
}

// ---- generic collections ----

type Select = fn(&mut ServerState) -> &mut Vec<Value>;

fn list_in(s: &Shared, select: Select) -> Response {
    let mut st = s.lock().expect("state");
    Json(Value::Array(select(&mut st).clone())).into_response()
}

fn get_in(s: &Shared, select: Select, id: i64) -> Response {
    let mut st = s.lock().expect("state");
    match select(&mut st).iter().find(|v| v["id"].as_i64() == Some(id)) {
        Some(v) => Json(v.clone()).into_response(),
        None => error(StatusCode::NOT_FOUND, "Not found."),
    }
}

fn create_in(s: &Shared, select: Select, defaults: Value, body: Value) -> Response {
    let mut st = s.lock().expect("state");
    let id = st.next_id();
    let mut item = defaults;
    merge(&mut item, body);
    item["id"] = json!(id);
    select(&mut st).push(item.clone());
    (StatusCode::CREATED, Json(item)).into_response()
}

fn update_in(s: &Shared, select: Select, id: i64, body: Value) -> Response {
    let mut st = s.lock().expect("state");
    match select(&mut st)
        .iter_mut()
        .find(|v| v["id"].as_i64() == Some(id))
    {
        Some(v) => {
            merge(v, body);
            Json(v.clone()).into_response()
        }
        None => error(StatusCode::NOT_FOUND, "Not found."),
    }
}

fn delete_in(s: &Shared, select: Select, id: i64) -> Response {
    let mut st = s.lock().expect("state");
    let list = select(&mut st);
    let before = list.len();
    list.retain(|v| v["id"].as_i64() != Some(id));
    if list.len() == before {
        error(StatusCode::NOT_FOUND, "Not found.")
    } else {
        StatusCode::NO_CONTENT.into_response()
    }
}

fn merge(target: &mut Value, patch: Value) {
    if let (Some(t), Value::Object(p)) = (target.as_object_mut(), patch) {
        for (k, v) in p {
            t.insert(k, v);
        }
    }
}

fn tasks(st: &mut ServerState) -> &mut Vec<Value> {
    &mut st.tasks
}
fn projects(st: &mut ServerState) -> &mut Vec<Value> {
    &mut st.projects
}
fn employees(st: &mut ServerState) -> &mut Vec<Value> {
    &mut st.employees
}
fn leaves(st: &mut ServerState) -> &mut Vec<Value> {
    &mut st.leave_requests
}

async fn list_tasks(State(s): State<Shared>) -> Response {
    list_in(&s, tasks)
}
async fn get_task(State(s): State<Shared>, Path(id): Path<i64>) -> Response {
    get_in(&s, tasks, id)
}
async fn create_task(State(s): State<Shared>, Json(b): Json<Value>) -> Response {
    let defaults = json!({ "description": "", "due_date": null, "status": "Pending" });
    create_in(&s, tasks, defaults, b)
}
async fn update_task(State(s): State<Shared>, Path(id): Path<i64>, Json(b): Json<Value>) -> Response {
    update_in(&s, tasks, id, b)
}
async fn delete_task(State(s): State<Shared>, Path(id): Path<i64>) -> Response {
    delete_in(&s, tasks, id)
}

async fn list_projects(State(s): State<Shared>) -> Response {
    list_in(&s, projects)
}
async fn create_project(State(s): State<Shared>, Json(b): Json<Value>) -> Response {
    create_in(&s, projects, json!({ "description": "" }), b)
}
async fn update_project(State(s): State<Shared>, Path(id): Path<i64>, Json(b): Json<Value>) -> Response {
    update_in(&s, projects, id, b)
}
async fn delete_project(State(s): State<Shared>, Path(id): Path<i64>) -> Response {
    delete_in(&s, projects, id)
}

async fn list_employees(State(s): State<Shared>) -> Response {
    list_in(&s, employees)
}
async fn get_employee(State(s): State<Shared>, Path(id): Path<i64>) -> Response {
    get_in(&s, employees, id)
}
async fn create_employee(State(s): State<Shared>, Json(b): Json<Value>) -> Response {
    create_in(&s, employees, json!({ "role": "", "is_active": true }), b)
}
async fn update_employee(State(s): State<Shared>, Path(id): Path<i64>, Json(b): Json<Value>) -> Response {
    update_in(&s, employees, id, b)
}
async fn delete_employee(State(s): State<Shared>, Path(id): Path<i64>) -> Response {
    delete_in(&s, employees, id)
}

async fn list_leaves(State(s): State<Shared>) -> Response {
    list_in(&s, leaves)
}
async fn create_leave(State(s): State<Shared>, Json(b): Json<Value>) -> Response {
    create_in(&s, leaves, json!({ "reason": "" }), b)
}
async fn update_leave(State(s): State<Shared>, Path(id): Path<i64>, Json(b): Json<Value>) -> Response {
    update_in(&s, leaves, id, b)
}
async fn delete_leave(State(s): State<Shared>, Path(id): Path<i64>) -> Response {
    delete_in(&s, leaves, id)
}
async fn set_leave_status(State(s): State<Shared>, Path(id): Path<i64>, Json(b): Json<Value>) -> Response {
    update_in(&s, leaves, id, json!({ "status": b["status"] }))
}

async fn leave_balance() -> Response {
    Json(json!({ "annual": 12.0, "sick": 5.0, "casual": 2.5 })).into_response()
}

async fn report_work_hours() -> Response {
    Json(json!([
        {
            "user": "alice",
            "clocked_in": "2026-10-01T09:00:00Z",
            "clocked_out": "2026-10-01T18:30:00Z",
            "hours_worked": 9.5,
            "extra_hours": 1.5
        },
        {
            "user": "bob",
            "clocked_in": "2026-10-02T08:00:00Z",
            "clocked_out": null,
            "hours_worked": 2.0,
            "extra_hours": 0.0
        }
    ]))
    .into_response()
}

async fn report_leave_balance() -> Response {
    Json(json!([{ "user": "alice", "annual": 12.0, "sick": 5.0, "casual": 2.5 }])).into_response()
}

async fn report_leave_requests(State(s): State<Shared>) -> Response {
    let rows: Vec<Value> = s
        .lock()
        .expect("state")
        .leave_requests
        .iter()
        .map(|r| {
            let mut row = r.clone();
            if let Some(o) = row.as_object_mut() {
                o.remove("id");
            }
            row
        })
        .collect();
    Json(Value::Array(rows)).into_response()
}

async fn report_tasks() -> Response {
    Json(json!([
        { "task_name": "Write docs", "status": "Pending", "assigned_to": "alice", "due_date": "2026-11-01" },
        { "task_name": "Ship, v2", "status": "Completed", "assigned_to": "bob", "due_date": "2026-09-30" }
    ]))
    .into_response()
}

async fn report_billable_hours() -> Response {
    Json(json!([
        { "employee": "alice", "task": "Write docs", "hours": 6.5, "billable_hours": 4.0 },
        { "employee": "bob", "task": "Ship, v2", "hours": 3.25, "billable_hours": 3.25 }
    ]))
    .into_response()
}

async fn report_performance_metrics() -> Response {
    Json(json!({ "total_completed": 4, "total_pending": 2, "total_in_progress": 1 })).into_response()
}

/// Two closed records on 2026-10-05 and one on 2026-10-06, times at midday UTC.
pub fn timesheet_entries() -> Vec<Value> {
    vec![
        json!({
            "id": 31,
            "time_clocked_in": "2026-10-05T09:00:00Z",
            "time_clocked_out": "2026-10-05T12:00:00Z",
            "notes": "Morning",
            "breaks": [{
                "id": 301,
                "break_type": "tea",
                "time_started": "2026-10-05T10:30:00Z",
                "time_ended": "2026-10-05T10:45:00Z"
            }]
        }),
        json!({
            "id": 32,
            "time_clocked_in": "2026-10-05T13:00:00Z",
            "time_clocked_out": "2026-10-05T15:30:00Z",
            "notes": null,
            "breaks": []
        }),
        json!({
            "id": 33,
            "time_clocked_in": "2026-10-06T10:00:00Z",
            "time_clocked_out": "2026-10-06T13:00:00Z",
            "notes": "Release",
            "breaks": []
        }),
    ]
}

async fn timesheet(Query(q): Query<HashMap<String, String>>) -> Response {
    let entries: Vec<Value> = timesheet_entries()
        .into_iter()
        .filter(|e| match q.get("date") {
            Some(d) => e["time_clocked_in"].as_str().is_some_and(|t| t.starts_with(d.as_str())),
            None => true,
        })
        .collect();
    Json(Value::Array(entries)).into_response()
}

fn router(state: Shared) -> Router {
    let protected = Router::new()
        .route("/api/clock-in/", post(clock_in))
        .route("/api/clock-out/", post(clock_out))
        .route("/api/take-break/", post(take_break))
        .route("/api/end-break/", post(end_break))
        .route("/api/active-clock-in/", get(active_clock_in))
        .route("/api/active-break/", get(active_break))
        .route("/api/tasks/", get(list_tasks).post(create_task))
        .route(
            "/api/tasks/:id/",
            get(get_task).patch(update_task).delete(delete_task),
        )
        .route("/api/projects/", get(list_projects).post(create_project))
        .route(
            "/api/projects/:id/",
            axum::routing::patch(update_project).delete(delete_project),
        )
        .route("/api/employees/data/", get(list_employees).post(create_employee))
        .route(
            "/api/employees/data/:id/",
            get(get_employee).patch(update_employee).delete(delete_employee),
        )
        .route("/api/leave-requests/", get(list_leaves).post(create_leave))
        .route(
            "/api/leave-requests/:id/",
            put(update_leave).delete(delete_leave),
        )
        .route("/api/leaves/:id/", put(set_leave_status))
        .route("/api/leave-balance/", get(leave_balance))
        .route("/api/reports/work-hours/", get(report_work_hours))
        .route("/api/reports/leave-balance/", get(report_leave_balance))
        .route("/api/reports/leave-requests/", get(report_leave_requests))
        .route("/api/reports/tasks/", get(report_tasks))
        .route("/api/reports/billable-hours/", get(report_billable_hours))
        .route(
            "/api/reports/performance-metrics/",
            get(report_performance_metrics),
        )
        .route("/api/timesheet/", get(timesheet))
        .route_layer(middleware::from_fn_with_state(state.clone(), auth));

    Router::new()
        .route("/api/login/", post(login))
        .merge(protected)
        .with_state(state)
}

// ------------------------------------------------
// In-memory clock server, for paused-time tests
// ------------------------------------------------

#[derive(Debug, Default)]
pub struct FakeClockState {
    next_id: i64,
    pub open: Option<ClockRecord>,
    pub open_break: Option<BreakRecord>,
    /// Call log, e.g. `"clock_out 101"`.
    pub calls: Vec<String>,
    /// Every call fails with `Unauthorized`.
    pub reject_token: bool,
    /// Returned once by the next `active_clock_in` call.
    pub pending_error: Option<AppError>,
    /// Returned once by the next `active_break` call.
    pub pending_break_error: Option<AppError>,
}

#[derive(Debug, Clone, Default)]
pub struct FakeClockApi {
    pub inner: Arc<Mutex<FakeClockState>>,
}

impl FakeClockApi {
    pub fn new() -> Self {
        let api = Self::default();
        api.inner.lock().expect("fake").next_id = 100;
        api
    }

    pub fn with_open_record(self, id: i64, clock_in_time: DateTime<Utc>) -> Self {
        self.inner.lock().expect("fake").open = Some(ClockRecord {
            record_id: id,
            clock_in_time,
            clock_out_time: None,
        });
        self
    }

    pub fn with_open_break(self, id: i64, break_type: BreakType, start_time: DateTime<Utc>) -> Self {
        self.inner.lock().expect("fake").open_break = Some(BreakRecord {
            break_id: id,
            break_type,
            start_time,
            notes: "restored".to_string(),
            end_time: None,
        });
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.inner.lock().expect("fake").calls.clone()
    }

    pub fn state<T>(&self, f: impl FnOnce(&mut FakeClockState) -> T) -> T {
        f(&mut self.inner.lock().expect("fake"))
    }

    fn enter(&self, call: String) -> AppResult<std::sync::MutexGuard<'_, FakeClockState>> {
        let mut st = self.inner.lock().expect("fake");
        st.calls.push(call);
        if st.reject_token {
            return Err(AppError::Unauthorized);
        }
        Ok(st)
    }
}

fn api_error(msg: &str) -> AppError {
    AppError::Api {
        status: 400,
        message: msg.to_string(),
    }
}

#[async_trait]
impl ClockApi for FakeClockApi {
    async fn clock_in(&self) -> AppResult<ClockRecord> {
        let mut st = self.enter("clock_in".into())?;
        if st.open.is_some() {
            return Err(api_error("You are already clocked in."));
        }
        st.next_id += 1;
        let record = ClockRecord {
            record_id: st.next_id,
            clock_in_time: Utc::now(),
            clock_out_time: None,
        };
        st.open = Some(record.clone());
        Ok(record)
    }

    async fn clock_out(&self, record_id: i64) -> AppResult<ClockRecord> {
        let mut st = self.enter(format!("clock_out {}", record_id))?;
        match st.open.take() {
            Some(mut r) if r.record_id == record_id => {
                st.open_break = None;
                r.clock_out_time = Some(Utc::now());
                Ok(r)
            }
            other => {
                st.open = other;
                Err(api_error("No active clock-in record"))
            }
        }
    }

    async fn start_break(
        &self,
        record_id: i64,
        break_type: BreakType,
        notes: &str,
    ) -> AppResult<BreakRecord> {
        let mut st = self.enter(format!("start_break {} {}", record_id, break_type))?;
        if st.open.as_ref().map(|r| r.record_id) != Some(record_id) {
            return Err(api_error("No active clock-in record"));
        }
        st.next_id += 1;
        let brk = BreakRecord {
            break_id: st.next_id,
            break_type,
            start_time: Utc::now(),
            notes: notes.to_string(),
            end_time: None,
        };
        st.open_break = Some(brk.clone());
        Ok(brk)
    }

    async fn end_break(&self, break_id: i64) -> AppResult<()> {
        let mut st = self.enter(format!("end_break {}", break_id))?;
        match &st.open_break {
            Some(b) if b.break_id == break_id => {
                st.open_break = None;
                Ok(())
            }
            _ => Err(api_error("No active break")),
        }
    }

    async fn active_clock_in(&self) -> AppResult<Option<ClockRecord>> {
        let mut st = self.enter("active_clock_in".into())?;
        if let Some(e) = st.pending_error.take() {
            return Err(e);
        }
        Ok(st.open.clone())
    }

    async fn active_break(&self, record_id: i64) -> AppResult<Option<BreakRecord>> {
        let mut st = self.enter(format!("active_break {}", record_id))?;
        if let Some(e) = st.pending_break_error.take() {
            return Err(e);
        }
        Ok(st
            .open
            .as_ref()
            .filter(|r| r.record_id == record_id)
            .and(st.open_break.clone()))
    }
}

/// A genuine connection-refused error, for the offline fallback.
pub async fn transport_error() -> AppError {
    let err = reqwest::Client::new()
        .get(dead_api_url())
        .send()
        .await
        .expect_err("nothing listens there");
    AppError::Http(err)
}
