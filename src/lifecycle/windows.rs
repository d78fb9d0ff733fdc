//! Windows service control manager adapter.

use std::ffi::c_void;
use std::io;
use std::sync::Mutex;

use windows::Win32::Foundation::{ERROR_CALL_NOT_IMPLEMENTED, NO_ERROR};
use windows::Win32::System::Services::{
    CloseServiceHandle, CreateServiceW, DeleteService, OpenSCManagerW, OpenServiceW,
    RegisterServiceCtrlHandlerExW, SC_HANDLE, SC_MANAGER_ALL_ACCESS, SERVICE_ACCEPT_SHUTDOWN,
    SERVICE_ACCEPT_STOP, SERVICE_ALL_ACCESS, SERVICE_AUTO_START, SERVICE_CONTROL_INTERROGATE,
    SERVICE_CONTROL_SHUTDOWN, SERVICE_CONTROL_STOP, SERVICE_ERROR_NORMAL, SERVICE_RUNNING,
    SERVICE_START_PENDING, SERVICE_STATUS, SERVICE_STATUS_CURRENT_STATE, SERVICE_STATUS_HANDLE,
    SERVICE_STOP_PENDING, SERVICE_STOPPED, SERVICE_TABLE_ENTRYW, SERVICE_WIN32_OWN_PROCESS,
    SetServiceStatus, StartServiceCtrlDispatcherW, StartServiceW,
};
use windows::core::{HSTRING, PCWSTR, PWSTR};

use super::{LifecycleError, NodeLaunch, ServiceLaunch, ServiceManager};
use crate::node::{NodeError, Shutdown, ShutdownTrigger};

/// The node handed from `run_dispatcher` to the service entry point.
static PENDING: Mutex<Option<NodeLaunch>> = Mutex::new(None);
/// The node's result handed back from the service entry point.
static FINISHED: Mutex<Option<Result<(), NodeError>>> = Mutex::new(None);
/// Fired by the control handler on stop or shutdown.
static TRIGGER: Mutex<Option<ShutdownTrigger>> = Mutex::new(None);
/// Status handle registered for the running service.
static STATUS: Mutex<Option<StatusHandle>> = Mutex::new(None);

#[derive(Clone, Copy)]
struct StatusHandle(SERVICE_STATUS_HANDLE);

// SAFETY: the handle is an opaque token the SCM accepts from any thread.
unsafe impl Send for StatusHandle {}

/// Closes a service control manager handle on drop.
struct Handle(SC_HANDLE);

impl Drop for Handle {
    fn drop(&mut self) {
        // SAFETY: the handle was returned by OpenSCManagerW, OpenServiceW or
        // CreateServiceW and is closed exactly once.
        let _ = unsafe { CloseServiceHandle(self.0) };
    }
}

/// [`ServiceManager`] backed by the Windows service control manager.
#[derive(Debug, Clone, Copy, Default)]
pub struct ScmManager;

impl ScmManager {
    fn open_manager() -> io::Result<Handle> {
        // SAFETY: null machine and database names select the local SCM.
        let handle = unsafe { OpenSCManagerW(PCWSTR::null(), PCWSTR::null(), SC_MANAGER_ALL_ACCESS) }
            .map_err(io::Error::other)?;
        Ok(Handle(handle))
    }

    fn open_service(name: &str) -> io::Result<Handle> {
        let manager = Self::open_manager()?;
        // SAFETY: `manager` is a live SCM handle for the duration of the call.
        let handle = unsafe { OpenServiceW(manager.0, &HSTRING::from(name), SERVICE_ALL_ACCESS) }
            .map_err(io::Error::other)?;
        Ok(Handle(handle))
    }
}

impl ServiceManager for ScmManager {
    fn install(&self, name: &str, launch: &ServiceLaunch) -> Result<(), LifecycleError> {
        let install = || -> io::Result<Handle> {
            let manager = Self::open_manager()?;
            let name = HSTRING::from(name);
            let command_line = HSTRING::from(launch.command_line());

            // SAFETY: every string outlives the call; optional arguments are null.
            let handle = unsafe {
                CreateServiceW(
                    manager.0,
                    &name,
                    &name,
                    SERVICE_ALL_ACCESS,
                    SERVICE_WIN32_OWN_PROCESS,
                    SERVICE_AUTO_START,
                    SERVICE_ERROR_NORMAL,
                    &command_line,
                    PCWSTR::null(),
                    None,
                    PCWSTR::null(),
                    PCWSTR::null(),
                    PCWSTR::null(),
                )
            }
            .map_err(io::Error::other)?;
            Ok(Handle(handle))
        };

        install()
            .map(drop)
            .map_err(|source| LifecycleError::ServiceInstall {
                name: name.to_string(),
                source,
            })
    }

    fn start(&self, name: &str) -> Result<(), LifecycleError> {
        let start = || -> io::Result<()> {
            let service = Self::open_service(name)?;
            // SAFETY: `service` is a live handle; the service takes no arguments.
            unsafe { StartServiceW(service.0, None) }.map_err(io::Error::other)
        };

        start().map_err(|source| LifecycleError::ServiceStart {
            name: name.to_string(),
            source,
        })
    }

    fn uninstall(&self, name: &str) -> Result<(), LifecycleError> {
        let uninstall = || -> io::Result<()> {
            let service = Self::open_service(name)?;
            // SAFETY: `service` is a live handle opened with delete access.
            unsafe { DeleteService(service.0) }.map_err(io::Error::other)
        };

        uninstall().map_err(|source| LifecycleError::ServiceUninstall {
            name: name.to_string(),
            source,
        })
    }

    fn run_dispatcher(&self, name: &str, launch: NodeLaunch) -> Result<(), LifecycleError> {
        if let Ok(mut pending) = PENDING.lock() {
            *pending = Some(launch);
        }

        let mut service_name: Vec<u16> = name.encode_utf16().chain(Some(0)).collect();
        let table = [
            SERVICE_TABLE_ENTRYW {
                lpServiceName: PWSTR(service_name.as_mut_ptr()),
                lpServiceProc: Some(service_main),
            },
            SERVICE_TABLE_ENTRYW::default(),
        ];

        // SAFETY: the table is null-terminated and outlives the call, which
        // blocks until the service has stopped.
        unsafe { StartServiceCtrlDispatcherW(table.as_ptr()) }.map_err(|e| {
            LifecycleError::ServiceDispatch {
                name: name.to_string(),
                source: io::Error::other(e),
            }
        })?;

        let finished = FINISHED.lock().ok().and_then(|mut slot| slot.take());
        match finished {
            Some(result) => result.map_err(LifecycleError::from),
            None => Ok(()),
        }
    }
}

/// Service entry point called by the dispatcher on its own thread.
unsafe extern "system" fn service_main(_argc: u32, argv: *mut PWSTR) {
    // SAFETY: the SCM passes the service name as the first argument.
    let name = unsafe { argv.as_ref().map(|arg| PCWSTR(arg.0)) }.unwrap_or(PCWSTR::null());

    // SAFETY: `control_handler` has the required signature and no context.
    let Ok(status) = (unsafe { RegisterServiceCtrlHandlerExW(name, Some(control_handler), None) })
    else {
        tracing::error!("Failed to register service control handler");
        return;
    };

    if let Ok(mut slot) = STATUS.lock() {
        *slot = Some(StatusHandle(status));
    }

    let Some(launch) = PENDING.lock().ok().and_then(|mut slot| slot.take()) else {
        report(SERVICE_STOPPED);
        return;
    };

    let (trigger, shutdown) = Shutdown::requested();
    if let Ok(mut slot) = TRIGGER.lock() {
        *slot = Some(trigger);
    }

    report(SERVICE_START_PENDING);
    report(SERVICE_RUNNING);
    tracing::info!("Running as a Windows service");

    let result = launch.run(shutdown);
    if let Err(e) = &result {
        tracing::error!("{e}");
    }
    if let Ok(mut slot) = FINISHED.lock() {
        *slot = Some(result);
    }

    report(SERVICE_STOPPED);
}

/// Handles control requests from the SCM.
unsafe extern "system" fn control_handler(
    control: u32,
    _event_type: u32,
    _event_data: *mut c_void,
    _context: *mut c_void,
) -> u32 {
    match control {
        SERVICE_CONTROL_STOP | SERVICE_CONTROL_SHUTDOWN => {
            report(SERVICE_STOP_PENDING);
            if let Some(trigger) = TRIGGER.lock().ok().and_then(|slot| slot.clone()) {
                trigger.trigger();
            }
            NO_ERROR.0
        }
        SERVICE_CONTROL_INTERROGATE => NO_ERROR.0,
        _ => ERROR_CALL_NOT_IMPLEMENTED.0,
    }
}

fn report(state: SERVICE_STATUS_CURRENT_STATE) {
    let Some(StatusHandle(handle)) = STATUS.lock().ok().and_then(|slot| *slot) else {
        return;
    };

    let accepted = if state == SERVICE_RUNNING {
        SERVICE_ACCEPT_STOP | SERVICE_ACCEPT_SHUTDOWN
    } else {
        0
    };

    let status = SERVICE_STATUS {
        dwServiceType: SERVICE_WIN32_OWN_PROCESS,
        dwCurrentState: state,
        dwControlsAccepted: accepted,
        dwWin32ExitCode: NO_ERROR.0,
        dwServiceSpecificExitCode: 0,
        dwCheckPoint: 0,
        dwWaitHint: 0,
    };

    // SAFETY: `handle` came from RegisterServiceCtrlHandlerExW.
    if let Err(e) = unsafe { SetServiceStatus(handle, &status) } {
        tracing::warn!("Failed to report service state: {e}");
    }
}
