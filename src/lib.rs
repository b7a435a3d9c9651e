pub mod common;
pub mod kinematics;
pub mod lifecycle;
pub mod synthesis;

use crate::lifecycle::LifecycleNode;
use crate::synthesis::SynthesisStack;

/// Core functionality for the Talos arm planner
pub struct TalosCore {
    components: Vec<Box<dyn LifecycleNode>>,
}

impl TalosCore {
    /// Create a new instance of TalosCore
    pub fn new() -> Self {
        TalosCore {
            components: Vec::new(),
        }
    }

    /// Register a component with the core
    pub fn register<T: LifecycleNode + 'static>(&mut self, component: T) {
        self.components.push(Box::new(component));
    }

    /// Number of registered components
    pub fn component_count(&self) -> usize {
        self.components.len()
    }

    /// Configure and activate all registered components
    pub fn init(&mut self) -> Result<(), String> {
        for component in &mut self.components {
            component.on_configure()?;
            component.on_activate()?;
        }
        Ok(())
    }

    /// Deactivate and clean up all registered components
    pub fn shutdown(&mut self) -> Result<(), String> {
        for component in &mut self.components {
            component.on_deactivate()?;
            component.on_cleanup()?;
        }
        Ok(())
    }

    /// Get a mutable reference to the synthesis stack, if one is registered
    pub fn synthesis_stack_mut(&mut self) -> Option<&mut SynthesisStack> {
        self.components
            .iter_mut()
            .find_map(|component| component.as_any_mut().downcast_mut::<SynthesisStack>())
    }
}

impl Default for TalosCore {
    fn default() -> Self {
        TalosCore::new()
    }
}
