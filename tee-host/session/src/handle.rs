// Licensed under the Apache-2.0 license

use tee_host_driver::TeeDriver;

/// Native handle owned by a session.
///
/// Allocated on construction and handed back to the driver exactly once,
/// either by [`NativeHandle::release`] or on drop.
pub(crate) struct NativeHandle<'d, D: TeeDriver> {
    driver: &'d D,
    handle: Option<D::Handle>,
}

impl<'d, D: TeeDriver> NativeHandle<'d, D> {
    pub fn alloc(driver: &'d D) -> Self {
        Self {
            driver,
            handle: Some(driver.alloc()),
        }
    }

    pub fn driver(&self) -> &'d D {
        self.driver
    }

    pub fn get(&self) -> Option<&D::Handle> {
        self.handle.as_ref()
    }

    pub fn get_mut(&mut self) -> Option<&mut D::Handle> {
        self.handle.as_mut()
    }

    /// Returns false if the handle was already released.
    pub fn release(&mut self) -> bool {
        match self.handle.take() {
            Some(handle) => {
                self.driver.release(handle);
                true
            }
            None => false,
        }
    }
}

impl<D: TeeDriver> Drop for NativeHandle<'_, D> {
    fn drop(&mut self) {
        self.release();
    }
}
