mod controller;
mod participant;
mod studio;
