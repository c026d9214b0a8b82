// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Host runtime abstraction.
//!
//! Projection only needs two capabilities from whatever runtime receives
//! the records: create a scalar value from a native number, and set a named
//! property on an object. [`HostRuntime`] captures exactly that, so an
//! embedding (a JS engine binding, a scripting VM) can receive records
//! directly. [`NativeHost`] builds this crate's own [`DynamicObject`].

use crate::value::{DynamicObject, DynamicValue};
use std::convert::Infallible;
use std::fmt;

/// Value and object factory of a dynamic host runtime.
pub trait HostRuntime {
    /// Host scalar handle.
    type Value;
    /// Host object handle.
    type Object;
    /// Host call failure.
    type Error: fmt::Display;

    fn create_bool(&mut self, value: bool) -> Result<Self::Value, Self::Error>;
    fn create_int32(&mut self, value: i32) -> Result<Self::Value, Self::Error>;
    fn create_uint32(&mut self, value: u32) -> Result<Self::Value, Self::Error>;
    fn create_int64(&mut self, value: i64) -> Result<Self::Value, Self::Error>;
    fn create_double(&mut self, value: f64) -> Result<Self::Value, Self::Error>;

    /// Fresh empty object; `fields` is a capacity hint.
    fn create_object(&mut self, fields: usize) -> Result<Self::Object, Self::Error>;

    fn set_named_property(
        &mut self,
        object: &mut Self::Object,
        name: &str,
        value: Self::Value,
    ) -> Result<(), Self::Error>;
}

/// In-process host producing [`DynamicValue`] / [`DynamicObject`].
#[derive(Debug, Default, Clone, Copy)]
pub struct NativeHost;

impl HostRuntime for NativeHost {
    type Value = DynamicValue;
    type Object = DynamicObject;
    type Error = Infallible;

    fn create_bool(&mut self, value: bool) -> Result<DynamicValue, Infallible> {
        Ok(DynamicValue::Bool(value))
    }

    fn create_int32(&mut self, value: i32) -> Result<DynamicValue, Infallible> {
        Ok(DynamicValue::Int32(value))
    }

    fn create_uint32(&mut self, value: u32) -> Result<DynamicValue, Infallible> {
        Ok(DynamicValue::Uint32(value))
    }

    fn create_int64(&mut self, value: i64) -> Result<DynamicValue, Infallible> {
        Ok(DynamicValue::Int64(value))
    }

    fn create_double(&mut self, value: f64) -> Result<DynamicValue, Infallible> {
        Ok(DynamicValue::Double(value))
    }

    fn create_object(&mut self, fields: usize) -> Result<DynamicObject, Infallible> {
        Ok(DynamicObject::with_capacity(fields))
    }

    fn set_named_property(
        &mut self,
        object: &mut DynamicObject,
        name: &str,
        value: DynamicValue,
    ) -> Result<(), Infallible> {
        object.set_named_property(name, value);
        Ok(())
    }
}
