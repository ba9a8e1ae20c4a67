use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;

use dicon::prelude::*;
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let configuration = Configuration::new().with(AppModule::new("web")).with(requests);
    let container = Container::with_module(&configuration).unwrap();

    for (user, database) in [("alice", "MySQL"), ("bob", "PostgreSQL"), ("carol", "Oracle")] {
        let scope = container.create_scope();
        let controller = container
            .resolve_scoped::<UserController>(&scope, "")
            .unwrap()
            .upgrade()
            .unwrap();
        if let Err(err) = controller.create_user(user, database) {
            eprintln!("failed to create {user}: {err}");
        }
    }
}

struct AppModule {
    app_name: &'static str,
}

impl AppModule {
    fn new(app_name: &'static str) -> Self {
        Self { app_name }
    }
}

impl Module for AppModule {
    fn configure(&self, container: &Container) -> Result<(), ContainerError> {
        bind::<&'static str>()
            .to_instance(Arc::new(self.app_name))
            .tagged("app_name")
            .set_on(container)?;

        bind::<dyn Logger>()
            .to_component::<ConsoleLogger>()
            .as_singleton()
            .set_on(container)?;

        bind::<dyn Database>()
            .to_component::<MySqlDatabase>()
            .tagged("MySQL")
            .set_on(container)?;

        bind::<dyn Database>()
            .to_component::<PostgreSqlDatabase>()
            .tagged("PostgreSQL")
            .set_on(container)
    }
}

fn requests(container: &Container) -> Result<(), ContainerError> {
    let next_id = Arc::new(AtomicU32::new(1));
    bind::<RequestContext>()
        .to_closure(move |_: &Container| {
            Ok(Arc::new(RequestContext {
                id: next_id.fetch_add(1, Ordering::SeqCst),
            }))
        })
        .as_transient()
        .set_on(container)?;

    bind::<UserController>().as_scoped().set_on(container)
}

trait Logger: Send + Sync {
    fn log(&self, message: &str);
}

struct ConsoleLogger {
    app_name: Arc<&'static str>,
}

#[component(dyn Logger)]
impl ConsoleLogger {
    #[construct]
    fn new(container: &Container) -> Result<Self, ContainerError> {
        let app_name = container.resolve_singleton("app_name")?;
        Ok(Self { app_name })
    }
}

impl Logger for ConsoleLogger {
    fn log(&self, message: &str) {
        println!("[{}] {}", self.app_name, message);
    }
}

trait Database: Send + Sync {
    fn save(&self, data: &str);
}

struct MySqlDatabase {
    logger: Arc<dyn Logger>,
}

#[component(dyn Database)]
impl MySqlDatabase {
    #[construct]
    fn connect(container: &Container) -> Result<Self, ContainerError> {
        let logger = container.resolve_singleton("")?;
        Ok(Self { logger })
    }
}

impl Database for MySqlDatabase {
    fn save(&self, data: &str) {
        self.logger.log(&format!("MySQL saved {data}"));
    }
}

struct PostgreSqlDatabase {
    logger: Arc<dyn Logger>,
}

#[component(dyn Database)]
impl PostgreSqlDatabase {
    #[construct]
    fn connect(container: &Container) -> Result<Self, ContainerError> {
        let logger = container.resolve_singleton("")?;
        Ok(Self { logger })
    }
}

impl Database for PostgreSqlDatabase {
    fn save(&self, data: &str) {
        self.logger.log(&format!("PostgreSQL saved {data}"));
    }
}

struct RequestContext {
    id: u32,
}

struct UserController {
    container: Container,
    logger: Arc<dyn Logger>,
    request: Arc<RequestContext>,
}

#[component]
impl UserController {
    #[construct]
    fn new(container: &Container) -> Result<Self, ContainerError> {
        Ok(Self {
            container: container.clone(),
            logger: container.resolve_singleton("")?,
            request: container.resolve_transient("")?,
        })
    }

    fn create_user(&self, name: &str, database: &str) -> Result<(), ContainerError> {
        self.logger
            .log(&format!("request #{}: creating user {name}", self.request.id));
        let database = self.container.resolve_transient::<dyn Database>(database)?;
        database.save(&format!("user {name}"));
        Ok(())
    }
}
