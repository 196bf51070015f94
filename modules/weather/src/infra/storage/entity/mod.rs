pub mod city;
pub mod temperature;
pub mod webhook;
