// Each test binary uses a different subset of these helpers.
#![allow(dead_code)]

use std::sync::Arc;
use std::sync::Mutex;

use async_trait::async_trait;
use auth::Authenticator;
use auth::Claims;
use auth::PasswordHasher;
use chrono::Utc;
use serde_json::json;
use serde_json::Value;
use sqlx::postgres::PgConnectOptions;
use sqlx::postgres::PgPoolOptions;
use sqlx::Connection;
use sqlx::Executor;
use sqlx::PgConnection;
use sqlx::PgPool;
use tasks_api::domain::login::service::LoginService;
use tasks_api::domain::task::errors::TaskError;
use tasks_api::domain::task::models::CreateTaskCommand;
use tasks_api::domain::task::models::Task;
use tasks_api::domain::task::models::TaskId;
use tasks_api::domain::task::models::TaskWithOwner;
use tasks_api::domain::task::ports::TaskRepository;
use tasks_api::domain::task::service::TaskService;
use tasks_api::domain::user::errors::UserError;
use tasks_api::domain::user::models::EmailAddress;
use tasks_api::domain::user::models::NewUser;
use tasks_api::domain::user::models::User;
use tasks_api::domain::user::models::UserId;
use tasks_api::domain::user::ports::UserRepository;
use tasks_api::domain::user::service::UserService;
use tasks_api::inbound::http::router::create_router;
use tasks_api::outbound::repositories::PostgresTaskRepository;
use tasks_api::outbound::repositories::PostgresUserRepository;

pub const TEST_SECRET: &[u8] = b"test-secret-key-for-jwt-signing-at-least-32-bytes";

/// Lowest cost bcrypt accepts; keeps the suite fast
const TEST_BCRYPT_COST: u32 = 4;

fn test_authenticator() -> Authenticator {
    Authenticator::with_hasher(TEST_SECRET, PasswordHasher::with_cost(TEST_BCRYPT_COST))
}

/// Shared tables standing in for Postgres
#[derive(Default)]
pub struct Store {
    users: Vec<User>,
    tasks: Vec<Task>,
    next_user_id: i64,
    next_task_id: i64,
}

pub struct InMemoryUserRepository {
    store: Arc<Mutex<Store>>,
}

pub struct InMemoryTaskRepository {
    store: Arc<Mutex<Store>>,
}

fn lock(store: &Mutex<Store>) -> std::sync::MutexGuard<'_, Store> {
    store.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create(&self, user: NewUser) -> Result<User, UserError> {
        let mut store = lock(&self.store);

        if store.users.iter().any(|u| u.email == user.email) {
            return Err(UserError::EmailAlreadyExists(user.email.to_string()));
        }

        store.next_user_id += 1;
        let created = User {
            id: UserId(store.next_user_id),
            email: user.email,
            name: user.name,
            age: user.age,
            password_hash: user.password_hash,
            created_at: Utc::now(),
        };
        store.users.push(created.clone());

        Ok(created)
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserError> {
        Ok(lock(&self.store).users.iter().find(|u| u.id == *id).cloned())
    }

    async fn find_by_email(&self, email: &EmailAddress) -> Result<Option<User>, UserError> {
        Ok(lock(&self.store)
            .users
            .iter()
            .find(|u| u.email == *email)
            .cloned())
    }

    async fn list_all(&self) -> Result<Vec<User>, UserError> {
        Ok(lock(&self.store).users.clone())
    }

    async fn update(&self, user: User) -> Result<User, UserError> {
        let mut store = lock(&self.store);

        if store
            .users
            .iter()
            .any(|u| u.email == user.email && u.id != user.id)
        {
            return Err(UserError::EmailAlreadyExists(user.email.to_string()));
        }

        let slot = store
            .users
            .iter_mut()
            .find(|u| u.id == user.id)
            .ok_or_else(|| UserError::NotFound(user.id.to_string()))?;
        *slot = user.clone();

        Ok(user)
    }

    async fn delete(&self, id: &UserId) -> Result<(), UserError> {
        let mut store = lock(&self.store);

        let before = store.users.len();
        store.users.retain(|u| u.id != *id);
        if store.users.len() == before {
            return Err(UserError::NotFound(id.to_string()));
        }

        // ON DELETE CASCADE
        store.tasks.retain(|t| t.user_id != *id);

        Ok(())
    }
}

#[async_trait]
impl TaskRepository for InMemoryTaskRepository {
    async fn create(&self, task: CreateTaskCommand) -> Result<Task, TaskError> {
        let mut store = lock(&self.store);

        if !store.users.iter().any(|u| u.id == task.user_id) {
            return Err(TaskError::OwnerNotFound(task.user_id.to_string()));
        }

        store.next_task_id += 1;
        let created = Task {
            id: TaskId(store.next_task_id),
            title: task.title,
            description: task.description,
            completed: task.completed,
            user_id: task.user_id,
            created_at: Utc::now(),
        };
        store.tasks.push(created.clone());

        Ok(created)
    }

    async fn find_by_id(&self, id: &TaskId) -> Result<Option<Task>, TaskError> {
        Ok(lock(&self.store).tasks.iter().find(|t| t.id == *id).cloned())
    }

    async fn list_with_owner(&self) -> Result<Vec<TaskWithOwner>, TaskError> {
        let store = lock(&self.store);

        Ok(store
            .tasks
            .iter()
            .filter_map(|task| {
                store
                    .users
                    .iter()
                    .find(|u| u.id == task.user_id)
                    .map(|owner| TaskWithOwner {
                        task: task.clone(),
                        owner_name: owner.name.clone(),
                    })
            })
            .collect())
    }

    async fn update(&self, task: Task) -> Result<Task, TaskError> {
        let mut store = lock(&self.store);

        if !store.users.iter().any(|u| u.id == task.user_id) {
            return Err(TaskError::OwnerNotFound(task.user_id.to_string()));
        }

        let slot = store
            .tasks
            .iter_mut()
            .find(|t| t.id == task.id)
            .ok_or_else(|| TaskError::NotFound(task.id.to_string()))?;
        *slot = task.clone();

        Ok(task)
    }

    async fn delete(&self, id: &TaskId) -> Result<(), TaskError> {
        let mut store = lock(&self.store);

        let before = store.tasks.len();
        store.tasks.retain(|t| t.id != *id);
        if store.tasks.len() == before {
            return Err(TaskError::NotFound(id.to_string()));
        }

        Ok(())
    }
}

/// Test application that spawns a real server
pub struct TestApp {
    pub address: String,
    pub api_client: reqwest::Client,
    pub authenticator: Authenticator,
}

impl TestApp {
    /// Spawn the application backed by in-memory repositories
    pub async fn spawn() -> Self {
        let store = Arc::new(Mutex::new(Store::default()));
        let user_repo = Arc::new(InMemoryUserRepository {
            store: Arc::clone(&store),
        });
        let task_repo = Arc::new(InMemoryTaskRepository { store });

        Self::spawn_with_repositories(user_repo, task_repo).await
    }

    /// Spawn the application backed by the PostgreSQL adapters of `db`
    pub async fn spawn_with_postgres(db: &TestDb) -> Self {
        let user_repo = Arc::new(PostgresUserRepository::new(db.pool.clone()));
        let task_repo = Arc::new(PostgresTaskRepository::new(db.pool.clone()));

        Self::spawn_with_repositories(user_repo, task_repo).await
    }

    /// Spawn the application in a background task and return TestApp
    pub async fn spawn_with_repositories<UR, TR>(user_repo: Arc<UR>, task_repo: Arc<TR>) -> Self
    where
        UR: UserRepository,
        TR: TaskRepository,
    {
        // Use random port (0 = OS assigns)
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind random port");
        let port = listener.local_addr().unwrap().port();
        let address = format!("http://127.0.0.1:{}", port);

        let authenticator = Arc::new(test_authenticator());

        let user_service = Arc::new(UserService::new(
            Arc::clone(&user_repo),
            Arc::clone(&authenticator),
        ));
        let task_service = Arc::new(TaskService::new(task_repo));
        let login_service = Arc::new(LoginService::new(user_repo, Arc::clone(&authenticator)));

        let router = create_router(user_service, task_service, login_service, authenticator);

        // Spawn server in background
        tokio::spawn(async move {
            axum::serve(listener, router).await.expect("Server error");
        });

        Self {
            address,
            api_client: reqwest::Client::new(),
            authenticator: test_authenticator(),
        }
    }

    /// Helper to make GET request
    pub fn get(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.get(format!("{}{}", self.address, path))
    }

    /// Helper to make POST request
    pub fn post(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.post(format!("{}{}", self.address, path))
    }

    /// Helper to make GET request with Bearer token
    pub fn get_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.get(path).bearer_auth(token)
    }

    /// Helper to make POST request with Bearer token
    pub fn post_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.post(path).bearer_auth(token)
    }

    /// Helper to make PUT request with Bearer token
    pub fn put_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.api_client
            .put(format!("{}{}", self.address, path))
            .bearer_auth(token)
    }

    /// Helper to make PATCH request with Bearer token
    pub fn patch_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.api_client
            .patch(format!("{}{}", self.address, path))
            .bearer_auth(token)
    }

    /// Helper to make DELETE request with Bearer token
    pub fn delete_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.api_client
            .delete(format!("{}{}", self.address, path))
            .bearer_auth(token)
    }

    /// Register a user through the public endpoint and return the response body
    pub async fn register(&self, email: &str, name: &str, password: &str) -> Value {
        let response = self
            .post("/api/users")
            .json(&json!({
                "email": email,
                "name": name,
                "password": password
            }))
            .send()
            .await
            .expect("Failed to execute request");

        assert_eq!(response.status(), reqwest::StatusCode::CREATED);
        response.json().await.expect("Failed to parse response")
    }

    /// Log in and return the issued token
    pub async fn login(&self, email: &str, password: &str) -> String {
        let response = self
            .post("/api/login")
            .json(&json!({ "email": email, "password": password }))
            .send()
            .await
            .expect("Failed to execute request");

        assert_eq!(response.status(), reqwest::StatusCode::OK);
        let body: Value = response.json().await.expect("Failed to parse response");
        body["token"]
            .as_str()
            .expect("Missing token")
            .to_string()
    }

    /// Register a user, log in, and return `(user id, token)`
    pub async fn signed_in_user(&self, email: &str, name: &str) -> (i64, String) {
        let user = self.register(email, name, "pass_word!").await;
        let token = self.login(email, "pass_word!").await;

        (user["id"].as_i64().expect("Missing user id"), token)
    }

    /// Mint a token directly, bypassing login
    pub fn token_for(&self, claims: &Claims) -> String {
        self.authenticator
            .generate_token(claims)
            .expect("Failed to sign token")
    }
}

/// Test database helper
///
/// Creates a throwaway database on the server named by `DATABASE_URL` and
/// applies the migrations to it.
pub struct TestDb {
    pub pool: PgPool,
    pub db_name: String,
    server_url: String,
}

impl TestDb {
    /// Create a new test database, or `None` when `DATABASE_URL` is not set
    pub async fn from_env() -> Option<Self> {
        let Ok(server_url) = std::env::var("DATABASE_URL") else {
            eprintln!("DATABASE_URL not set, skipping PostgreSQL test");
            return None;
        };

        Some(Self::new(server_url).await)
    }

    async fn new(server_url: String) -> Self {
        let db_name = format!(
            "test_tasks_api_{}",
            uuid::Uuid::new_v4().to_string().replace('-', "_")
        );

        let mut conn = PgConnection::connect(&server_url)
            .await
            .expect("Failed to connect to Postgres");

        conn.execute(format!(r#"CREATE DATABASE "{}";"#, db_name).as_str())
            .await
            .expect("Failed to create test database");

        let options = server_url
            .parse::<PgConnectOptions>()
            .expect("Failed to parse DATABASE_URL")
            .database(&db_name);

        let pool = PgPoolOptions::new()
            .max_connections(5)
            .connect_with(options)
            .await
            .expect("Failed to connect to test database");

        sqlx::migrate!("./migrations")
            .run(&pool)
            .await
            .expect("Failed to run migrations");

        Self {
            pool,
            db_name,
            server_url,
        }
    }
}

impl Drop for TestDb {
    fn drop(&mut self) {
        // Database cleanup happens asynchronously
        let db_name = self.db_name.clone();
        let server_url = self.server_url.clone();
        tokio::spawn(async move {
            if let Ok(mut conn) = PgConnection::connect(&server_url).await {
                let _ = conn
                    .execute(
                        format!(
                            r#"SELECT pg_terminate_backend(pid) FROM pg_stat_activity WHERE datname = '{}';"#,
                            db_name
                        )
                        .as_str(),
                    )
                    .await;

                let _ = conn
                    .execute(format!(r#"DROP DATABASE IF EXISTS "{}";"#, db_name).as_str())
                    .await;
            }
        });
    }
}
