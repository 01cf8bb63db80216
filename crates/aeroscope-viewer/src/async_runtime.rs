//! Async runtime bridging for native and WASM builds.
//!
//! [`TaskSpawner`] is a `SystemParam` that hides the platform difference:
//! - Native: Tokio through `bevy_tokio_tasks` (reqwest needs a Tokio reactor).
//! - WASM: Bevy's `AsyncComputeTaskPool` (reqwest uses the browser's fetch).

use bevy::prelude::*;

/// Installs the async runtime for the current platform.
pub struct AsyncRuntimePlugin;

impl Plugin for AsyncRuntimePlugin {
    fn build(&self, app: &mut App) {
        #[cfg(target_family = "wasm")]
        let _ = app;

        #[cfg(not(target_family = "wasm"))]
        app.add_plugins(bevy_tokio_tasks::TokioTasksPlugin::default());
    }
}

#[cfg(not(target_family = "wasm"))]
mod native {
    use std::future::Future;

    use bevy::{ecs::system::SystemParam, prelude::*};

    /// Handle to a spawned task. Aborting it also aborts in-flight requests.
    pub struct SpawnedTask(tokio::task::JoinHandle<()>);

    impl SpawnedTask {
        pub fn cancel(self) {
            self.0.abort();
        }
    }

    #[derive(SystemParam)]
    pub struct TaskSpawner<'w, 's> {
        runtime: Res<'w, bevy_tokio_tasks::TokioTasksRuntime>,
        // Matches the WASM signature.
        _local: Local<'s, ()>,
    }

    impl TaskSpawner<'_, '_> {
        /// Spawn a task whose result travels back over a channel.
        pub fn spawn<F>(&self, future: F) -> SpawnedTask
        where
            F: Future<Output = ()> + Send + 'static,
        {
            SpawnedTask(self.runtime.spawn_background_task(move |_ctx| future))
        }
    }
}

#[cfg(target_family = "wasm")]
mod wasm {
    use std::future::Future;

    use bevy::{ecs::system::SystemParam, prelude::*, tasks::AsyncComputeTaskPool};

    /// Handle to a spawned task. Dropping the inner task stops polling it.
    pub struct SpawnedTask(bevy::tasks::Task<()>);

    impl SpawnedTask {
        pub fn cancel(self) {
            drop(self.0);
        }
    }

    #[derive(SystemParam)]
    pub struct TaskSpawner<'w, 's> {
        _local: Local<'s, ()>,
        _marker: std::marker::PhantomData<&'w ()>,
    }

    impl TaskSpawner<'_, '_> {
        /// Spawn a task whose result travels back over a channel.
        ///
        /// The browser is single-threaded, so `Send` is not required.
        pub fn spawn<F>(&self, future: F) -> SpawnedTask
        where
            F: Future<Output = ()> + 'static,
        {
            SpawnedTask(AsyncComputeTaskPool::get().spawn_local(future))
        }
    }
}

#[cfg(not(target_family = "wasm"))]
pub use native::{SpawnedTask, TaskSpawner};
#[cfg(target_family = "wasm")]
pub use wasm::{SpawnedTask, TaskSpawner};
