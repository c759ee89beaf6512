//! Background thread that runs catalog calls for the terminal UI.
//!
//! The UI loop owns every coordinator. It submits [`Job`]s carrying the
//! tickets it issued and applies the returned [`Completion`]s on its own
//! thread, where stale tickets are dropped.

use std::sync::Arc;
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread;
#[cfg(test)]
use std::time::Duration;

use anyhow::{Context, Result};

use crate::catalog::{
    ApplicationPage, CatalogError, EnvironmentList, ImportResult, RemoteCatalog,
};
use crate::discovery::{DetailTicket, EnvironmentsTicket, FetchTicket, ImportTicket};
use crate::model::CatalogItem;

pub(super) type SharedCatalog = Arc<dyn RemoteCatalog + Send + Sync>;

#[derive(Debug)]
pub(super) enum Job {
    Environments(EnvironmentsTicket),
    Page(FetchTicket),
    Detail {
        ticket: DetailTicket,
        environment_id: String,
        application_id: String,
    },
    Import(ImportTicket),
}

#[derive(Debug)]
pub(super) enum Completion {
    Environments(EnvironmentsTicket, Result<EnvironmentList, CatalogError>),
    Page(FetchTicket, Result<ApplicationPage, CatalogError>),
    Detail {
        ticket: DetailTicket,
        environment_id: String,
        application_id: String,
        result: Result<CatalogItem, CatalogError>,
    },
    Import(ImportTicket, Result<ImportResult, CatalogError>),
}

pub(super) struct Worker {
    jobs: Sender<Job>,
    done: Receiver<Completion>,
    in_flight: usize,
}

impl Worker {
    pub(super) fn spawn(catalog: SharedCatalog) -> Result<Self> {
        let (jobs, job_rx) = mpsc::channel::<Job>();
        let (done_tx, done) = mpsc::channel::<Completion>();

        thread::Builder::new()
            .name("discover-worker".to_string())
            .spawn(move || {
                for job in job_rx {
                    let completion = execute(catalog.as_ref(), job);
                    if done_tx.send(completion).is_err() {
                        break;
                    }
                }
                tracing::debug!("catalog worker stopped");
            })
            .context("spawn catalog worker")?;

        Ok(Self {
            jobs,
            done,
            in_flight: 0,
        })
    }

    pub(super) fn submit(&mut self, job: Job) {
        match self.jobs.send(job) {
            Ok(()) => self.in_flight += 1,
            Err(err) => tracing::error!(job = ?err.0, "catalog worker is gone; job dropped"),
        }
    }

    pub(super) fn try_recv(&mut self) -> Option<Completion> {
        let completion = self.done.try_recv().ok()?;
        self.in_flight = self.in_flight.saturating_sub(1);
        Some(completion)
    }

    #[cfg(test)]
    pub(super) fn recv_timeout(&mut self, timeout: Duration) -> Option<Completion> {
        let completion = self.done.recv_timeout(timeout).ok()?;
        self.in_flight = self.in_flight.saturating_sub(1);
        Some(completion)
    }

    pub(super) fn is_busy(&self) -> bool {
        self.in_flight > 0
    }
}

fn execute(catalog: &dyn RemoteCatalog, job: Job) -> Completion {
    match job {
        Job::Environments(ticket) => Completion::Environments(ticket, catalog.list_environments()),
        Job::Page(ticket) => {
            let result =
                catalog.list_discovered_applications(ticket.environment_id(), &ticket.page_request());
            Completion::Page(ticket, result)
        }
        Job::Detail {
            ticket,
            environment_id,
            application_id,
        } => {
            let result = catalog.get_discovered_application(&environment_id, &application_id);
            Completion::Detail {
                ticket,
                environment_id,
                application_id,
                result,
            }
        }
        Job::Import(ticket) => {
            let result = catalog.import_application(ticket.request());
            Completion::Import(ticket, result)
        }
    }
}
